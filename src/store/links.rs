use crate::models::{Side, TableConnection};
use crate::store::{EntityStore, StoreError};

/// Cross-side links, kept in insertion order. A table is an endpoint of at most one link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkStore {
    connections: Vec<TableConnection>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `a_table_id` (legacy) to `b_table_id` (modern), evicting any
    /// link that already touches either table.
    pub fn create_link(
        &mut self,
        a_table_id: &str,
        b_table_id: &str,
        entities: &EntityStore,
        id: String,
    ) -> Result<&TableConnection, StoreError> {
        let a_side = entities
            .side_of_table(a_table_id)
            .ok_or_else(|| StoreError::UnknownTable(a_table_id.to_string()))?;
        let b_side = entities
            .side_of_table(b_table_id)
            .ok_or_else(|| StoreError::UnknownTable(b_table_id.to_string()))?;

        if a_side == b_side {
            return Err(StoreError::SameSide(
                a_table_id.to_string(),
                b_table_id.to_string(),
            ));
        }
        if a_side != Side::Legacy {
            return Err(StoreError::WrongSide {
                table: a_table_id.to_string(),
                expected: Side::Legacy,
            });
        }

        self.connections
            .retain(|conn| !conn.touches(a_table_id) && !conn.touches(b_table_id));

        let index = self.connections.len();
        self.connections.push(TableConnection {
            id,
            a_table_id: a_table_id.to_string(),
            b_table_id: b_table_id.to_string(),
        });
        Ok(&self.connections[index])
    }

    /// Drops the link touching `table_id`, if there is one.
    pub fn remove_link(&mut self, table_id: &str) -> bool {
        self.remove_links_referencing(table_id) > 0
    }

    pub fn remove_links_referencing(&mut self, table_id: &str) -> usize {
        let before = self.connections.len();
        self.connections.retain(|conn| !conn.touches(table_id));
        before - self.connections.len()
    }

    pub fn is_connected(&self, table_id: &str) -> bool {
        self.connections.iter().any(|conn| conn.touches(table_id))
    }

    pub fn partner_of(&self, table_id: &str) -> Option<&str> {
        self.connections.iter().find_map(|conn| conn.partner(table_id))
    }

    pub fn as_slice(&self) -> &[TableConnection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{IdGenerator, SequentialIds};

    struct Fixture {
        entities: EntityStore,
        ids: SequentialIds,
        legacy_db: String,
        modern_db: String,
    }

    impl Fixture {
        fn new() -> Self {
            let mut entities = EntityStore::new();
            let mut ids = SequentialIds::default();
            let legacy_db = entities.add_group(Side::Legacy, &mut ids);
            let modern_db = entities.add_group(Side::Modern, &mut ids);
            Self { entities, ids, legacy_db, modern_db }
        }

        fn table(&mut self, side: Side) -> String {
            let db = match side {
                Side::Legacy => self.legacy_db.clone(),
                Side::Modern => self.modern_db.clone(),
            };
            self.entities.add_table(&db, &mut self.ids).unwrap()
        }
    }

    fn endpoints(links: &LinkStore) -> Vec<(String, String)> {
        links
            .as_slice()
            .iter()
            .map(|c| (c.a_table_id.clone(), c.b_table_id.clone()))
            .collect()
    }

    #[test]
    fn test_relinking_evicts_previous_link() {
        let mut f = Fixture::new();
        let t1 = f.table(Side::Legacy);
        let t2 = f.table(Side::Modern);
        let t3 = f.table(Side::Modern);
        let mut links = LinkStore::new();

        links.create_link(&t1, &t2, &f.entities, f.ids.next_id("connection")).unwrap();
        assert_eq!(endpoints(&links), vec![(t1.clone(), t2.clone())]);

        links.create_link(&t1, &t3, &f.entities, f.ids.next_id("connection")).unwrap();
        assert_eq!(endpoints(&links), vec![(t1.clone(), t3.clone())]);
        assert!(!links.is_connected(&t2));
    }

    #[test]
    fn test_eviction_keeps_one_link_per_table() {
        let mut f = Fixture::new();
        let legacy: Vec<String> = (0..3).map(|_| f.table(Side::Legacy)).collect();
        let modern: Vec<String> = (0..3).map(|_| f.table(Side::Modern)).collect();
        let mut links = LinkStore::new();

        let pairs = [(0, 0), (1, 1), (0, 1), (2, 0), (1, 2), (2, 2), (0, 0)];
        for (a, b) in pairs {
            links
                .create_link(&legacy[a], &modern[b], &f.entities, f.ids.next_id("connection"))
                .unwrap();

            for table in legacy.iter().chain(modern.iter()) {
                let count = links.as_slice().iter().filter(|c| c.touches(table)).count();
                assert!(count <= 1, "{} appears in {} links", table, count);
            }
        }
    }

    #[test]
    fn test_same_side_link_is_rejected() {
        let mut f = Fixture::new();
        let t1 = f.table(Side::Legacy);
        let t2 = f.table(Side::Modern);
        let t4 = f.table(Side::Legacy);
        let mut links = LinkStore::new();
        links.create_link(&t1, &t2, &f.entities, f.ids.next_id("connection")).unwrap();
        let before = links.clone();

        let err = links.create_link(&t1, &t4, &f.entities, f.ids.next_id("connection")).unwrap_err();

        assert_eq!(err, StoreError::SameSide(t1, t4));
        assert_eq!(links, before);
    }

    #[test]
    fn test_reversed_endpoints_are_rejected() {
        let mut f = Fixture::new();
        let a = f.table(Side::Legacy);
        let b = f.table(Side::Modern);
        let mut links = LinkStore::new();

        let err = links.create_link(&b, &a, &f.entities, f.ids.next_id("connection")).unwrap_err();

        assert!(matches!(err, StoreError::WrongSide { expected: Side::Legacy, .. }));
        assert!(links.is_empty());
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let mut f = Fixture::new();
        let a = f.table(Side::Legacy);
        let mut links = LinkStore::new();

        let err = links.create_link(&a, "ghost", &f.entities, f.ids.next_id("connection")).unwrap_err();
        assert_eq!(err, StoreError::UnknownTable("ghost".to_string()));
    }

    #[test]
    fn test_remove_link_from_either_side() {
        let mut f = Fixture::new();
        let a = f.table(Side::Legacy);
        let b = f.table(Side::Modern);
        let mut links = LinkStore::new();
        links.create_link(&a, &b, &f.entities, f.ids.next_id("connection")).unwrap();

        assert_eq!(links.partner_of(&a), Some(b.as_str()));
        assert!(links.remove_link(&b));
        assert!(links.is_empty());
        assert!(!links.remove_link(&b));
    }

    #[test]
    fn test_links_keep_insertion_order() {
        let mut f = Fixture::new();
        let a1 = f.table(Side::Legacy);
        let a2 = f.table(Side::Legacy);
        let b1 = f.table(Side::Modern);
        let b2 = f.table(Side::Modern);
        let mut links = LinkStore::new();

        links.create_link(&a2, &b2, &f.entities, f.ids.next_id("connection")).unwrap();
        links.create_link(&a1, &b1, &f.entities, f.ids.next_id("connection")).unwrap();

        assert_eq!(endpoints(&links), vec![(a2, b2), (a1, b1)]);
    }
}
