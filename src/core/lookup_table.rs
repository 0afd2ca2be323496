use more_asserts::{assert_ge, assert_gt};

/**
 * Table of precomputed values over a closed query domain. Entry `i` holds the value at
 * the `i`-th of `entry_count` evenly spaced queries (both ends included). A query selects
 * its entry by truncation, `floor((query - lower) * entry_count / (upper - lower))`,
 * clamped to the table, so the domain is split into `entry_count` equal-width bins.
 */
#[derive(Clone, Debug)]
pub struct LookupTable<T> {
    table_entries: Vec<T>,
    query_offset: f32,
    query_to_index_scale: f32,
}

impl<T> LookupTable<T> {
    pub fn new<F>(query_domain: [f32; 2], entry_count: usize, query_to_data: F) -> LookupTable<T>
    where
        F: Fn(f32) -> T,
    {
        assert_ge!(query_domain[1], query_domain[0]);
        assert_gt!(entry_count, 1);

        let span = query_domain[1] - query_domain[0];
        let last_index = (entry_count - 1) as f32;
        let table_entries: Vec<T> = (0..entry_count)
            .map(|i| query_to_data(query_domain[0] + span * (i as f32) / last_index))
            .collect();

        let query_to_index_scale = (entry_count as f32) / span;

        LookupTable {
            table_entries,
            query_offset: query_domain[0],
            query_to_index_scale,
        }
    }

    pub fn len(&self) -> usize {
        self.table_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table_entries.is_empty()
    }

    pub fn index(&self, query: f32) -> usize {
        let raw = (query - self.query_offset) * self.query_to_index_scale;
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.table_entries.len() - 1)
        }
    }

    pub fn lookup_ref(&self, query: f32) -> &T {
        &self.table_entries[self.index(query)]
    }
}

impl<T: Clone> LookupTable<T> {
    pub fn lookup(&self, query: f32) -> T {
        self.lookup_ref(query).clone()
    }
}
