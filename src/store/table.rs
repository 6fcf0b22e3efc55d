use crate::models::ClientRecord;

/// Ordered, append-only collection of client records for one session.
///
/// Insertion order is display order. `append` returns a new table and leaves
/// the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    records: Vec<ClientRecord>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ClientRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn append(&self, record: ClientRecord) -> Self {
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend_from_slice(&self.records);
        records.push(record);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClientRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ClientRecord> {
        self.records.last()
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a ClientRecord;
    type IntoIter = std::slice::Iter<'a, ClientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Rows ordered newest service date first. Ties keep insertion order.
pub fn sort_by_date_desc(view: &mut [&ClientRecord]) {
    view.sort_by(|a, b| b.service_date.cmp(&a.service_date));
}
