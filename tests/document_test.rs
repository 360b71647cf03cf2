use chrono::NaiveDate;
use newsdex::prelude::*;

#[test]
fn test_document_accessors() {
    let date = NaiveDate::from_ymd_opt(2011, 12, 18).unwrap();
    let d = Document::new("Kim visits Korea", "A state visit", date);

    assert_eq!(d.title(), "Kim visits Korea");
    assert_eq!(d.description(), "A state visit");
    assert_eq!(d.pub_date(), Some(date));
    assert_eq!(d.text(Field::Title), d.title());
    assert_eq!(d.text(Field::Description), d.description());

    // A plain value
    let d2 = d.clone();
    assert_eq!(d, d2);
}
