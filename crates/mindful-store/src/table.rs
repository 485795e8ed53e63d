use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use mindful_types::models::Id;

/// One entity type: rows keyed by id plus the id sequence.
pub(crate) struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
    last_timestamp: Option<DateTime<Utc>>,
}

impl<T> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            last_timestamp: None,
        }
    }

    /// Assign the next id and a timestamp no earlier than the previous
    /// insert's, build the row and store it.
    pub(crate) fn insert_with<F>(&mut self, now: DateTime<Utc>, build: F) -> &T
    where
        F: FnOnce(Id, DateTime<Utc>) -> T,
    {
        let id = self.next_id;
        self.next_id += 1;

        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);

        self.rows.entry(id).or_insert(build(id, timestamp))
    }

    pub(crate) fn get(&self, id: Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}
