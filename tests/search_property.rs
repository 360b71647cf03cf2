use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use newsdex::prelude::*;

const WORDS: &[&str] = &["kim", "korea", "us", "dawn", "video", "iraq", "oil", "storm"];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|ws| ws.join(" "))
}

fn pub_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..20).prop_map(|n| {
        NaiveDate::from_ymd_opt(2011, 12, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    })
}

fn documents() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(
        (text(), text(), pub_date()).prop_map(|(t, d, date)| Document::new(t, d, date)),
        1..40,
    )
}

fn ids_of(index: &Index, q: &Query) -> HashSet<DocId> {
    Evaluator::default()
        .matching_docs(index, q)
        .unwrap()
        .iter()
        .collect()
}

proptest! {
    #[test]
    fn universal_match(docs in documents()) {
        let index = Index::build(&docs).unwrap();
        let titles = evaluate(&index, &Query::match_all()).unwrap();
        prop_assert_eq!(titles.len(), docs.len());
    }

    #[test]
    fn vocabulary_miss(docs in documents()) {
        let index = Index::build(&docs).unwrap();
        let q = Query::builder().in_title(["zeppelin"]).build().unwrap();
        prop_assert!(evaluate(&index, &q).unwrap().is_empty());
    }

    #[test]
    fn conjunction_is_intersection(docs in documents(), a in prop::sample::select(WORDS), b in prop::sample::select(WORDS)) {
        let index = Index::build(&docs).unwrap();
        let qa = Query::builder().in_title([a]).build().unwrap();
        let qb = Query::builder().in_title([b]).build().unwrap();
        let qab = Query::builder().in_title([a, b]).build().unwrap();

        let expected: HashSet<DocId> = ids_of(&index, &qa).intersection(&ids_of(&index, &qb)).cloned().collect();
        prop_assert_eq!(ids_of(&index, &qab), expected);
    }

    #[test]
    fn exclusion(docs in documents(), x in prop::sample::select(WORDS)) {
        let index = Index::build(&docs).unwrap();
        let q = Query::builder().not_in_title([x]).build().unwrap();
        let analyzer = Analyzer::new();
        for doc_id in ids_of(&index, &q) {
            let d = &docs[doc_id as usize];
            prop_assert!(!analyzer.tokenize(d.title()).any(|t| t == x));
        }
    }

    #[test]
    fn range_inclusive(docs in documents(), pick in any::<prop::sample::Index>()) {
        let index = Index::build(&docs).unwrap();
        let doc_id = pick.index(docs.len());
        let date = docs[doc_id].pub_date().unwrap();

        let on_start = Query::builder().start_date(date).build().unwrap();
        let on_end = Query::builder().end_date(date).build().unwrap();
        let on_both = Query::builder().start_date(date).end_date(date).build().unwrap();
        for q in [on_start, on_end, on_both] {
            prop_assert!(ids_of(&index, &q).contains(&(doc_id as DocId)));
        }
    }

    #[test]
    fn idempotence(docs in documents(), x in prop::sample::select(WORDS)) {
        let index = Index::build(&docs).unwrap();
        let q = Query::builder().in_description([x]).build().unwrap();
        prop_assert_eq!(evaluate(&index, &q).unwrap(), evaluate(&index, &q).unwrap());
    }
}
