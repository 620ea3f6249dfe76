use serde::{Deserialize, Serialize};

/// A link between one legacy table (`a_table_id`) and one modern table (`b_table_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConnection {
    pub id: String,
    #[serde(alias = "v2TableId")]
    pub a_table_id: String,
    #[serde(alias = "v3TableId")]
    pub b_table_id: String,
}

impl TableConnection {
    pub fn touches(&self, table_id: &str) -> bool {
        self.a_table_id == table_id || self.b_table_id == table_id
    }

    /// The table on the other end, if `table_id` is one of the endpoints.
    pub fn partner(&self, table_id: &str) -> Option<&str> {
        if self.a_table_id == table_id {
            Some(&self.b_table_id)
        } else if self.b_table_id == table_id {
            Some(&self.a_table_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_old_endpoint_names() {
        let json = r#"[{"id":"connection-1","v2TableId":"t1","v3TableId":"t2"}]"#;
        let connections: Vec<TableConnection> = serde_json::from_str(json).unwrap();

        assert_eq!(connections[0].a_table_id, "t1");
        assert_eq!(connections[0].b_table_id, "t2");

        let out = serde_json::to_value(&connections[0]).unwrap();
        assert_eq!(out["aTableId"], "t1");
        assert_eq!(out["bTableId"], "t2");
    }

    #[test]
    fn test_partner_lookup() {
        let conn = TableConnection {
            id: "c".to_string(),
            a_table_id: "t1".to_string(),
            b_table_id: "t2".to_string(),
        };
        assert_eq!(conn.partner("t1"), Some("t2"));
        assert_eq!(conn.partner("t2"), Some("t1"));
        assert_eq!(conn.partner("t3"), None);
        assert!(conn.touches("t2"));
    }
}
