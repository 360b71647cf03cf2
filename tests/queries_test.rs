use chrono::NaiveDate;
use newsdex::prelude::*;

#[test]
fn test_builder_validation() {
    assert!(Query::builder().in_title(["kim"]).build().is_ok());

    for b in [
        Query::builder().in_title(Vec::<&str>::new()),
        Query::builder().not_in_title(Vec::<&str>::new()),
        Query::builder().in_description(Vec::<&str>::new()),
        Query::builder().not_in_description(Vec::<&str>::new()),
    ] {
        assert!(matches!(b.build(), Err(SearchError::EmptyTermSet { .. })));
    }

    let e = Query::builder()
        .start_date_str("2011-12-19")
        .end_date_str("2011-12-18")
        .build()
        .unwrap_err();
    assert_eq!(
        e.to_string(),
        "invalid date range: start 2011-12-19 is after end 2011-12-18"
    );

    let e = Query::builder().start_date_str("yesterday").build().unwrap_err();
    assert!(matches!(e, SearchError::InvalidDate { ref input, .. } if input == "yesterday"));
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2011-12-18").unwrap(),
        NaiveDate::from_ymd_opt(2011, 12, 18).unwrap()
    );
    assert_eq!(
        parse_date(" 2000-01-01 ").unwrap(),
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    );
    assert!(parse_date("2011-02-30").is_err());
    assert!(parse_date("20111218").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn test_occur_and_field_names() {
    assert_eq!(Occur::Must.to_string(), "in");
    assert_eq!(Occur::MustNot.to_string(), "not in");
    assert_eq!(Field::Title.to_string(), "title");
    assert_eq!(Field::Description.to_string(), "description");
}

#[test]
fn test_terms_kept_as_given() {
    // Normalisation happens at evaluation time.
    let q = Query::builder().in_title(["KIM", "Korea"]).build().unwrap();
    let terms: Vec<&str> = q
        .terms(Field::Title, Occur::Must)
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(terms, vec!["KIM", "Korea"]);
    assert_eq!(q.to_string(), "Search (in title: [KIM, Korea]):");
}

#[test]
fn test_query_echo_format() {
    let cases = [
        (
            Query::builder().in_title(["kim"]).not_in_description(["korea"]),
            "Search (in title: [kim]; not in description: [korea]):",
        ),
        (
            Query::builder()
                .start_date_str("2011-12-18")
                .end_date_str("2011-12-18"),
            "Search (startDate: 2011-12-18; endDate: 2011-12-18):",
        ),
        (
            Query::builder().in_title(["video"]).start_date_str("2000-01-01"),
            "Search (in title: [video]; startDate: 2000-01-01):",
        ),
    ];
    for (b, expected) in cases {
        assert_eq!(b.build().unwrap().to_string(), expected);
    }
}
