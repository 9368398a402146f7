use studyrec_core::MaterialRecord;

/// The searchable text of a record: title, description and tags joined by
/// single spaces. Category is left out; it is only used for filtering.
pub fn combined_text(record: &MaterialRecord) -> String {
    let mut text = String::with_capacity(record.title.len() + record.description.len() + record.tags.len() + 2);
    text.push_str(&record.title);
    text.push(' ');
    text.push_str(&record.description);
    text.push(' ');
    text.push_str(&record.tags);
    text
}
