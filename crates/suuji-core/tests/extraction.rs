use pretty_assertions::assert_eq;

use suuji_core::extract::dates::{DATE, DATE_DAY, DATE_MONTH, DATE_STRING, DATE_YEAR};
use suuji_core::extract::postal_codes::{POSTAL_CODE_STRING, POSTAL_CODE_VALUE};
use suuji_core::extract::{extract_dates, extract_postal_codes, extract_times, Fields};
use suuji_core::{
    extract_all_dates, extract_all_phone_numbers, extract_all_postal_codes, extract_all_times,
    CompositeDate, DateExtractor, DocumentParser, EntityExtractor, ExtractedMatch, FieldValue,
    LocaleTables, Month, PostalCode, SuujiConfig, Year, Day,
};

fn field(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

#[test]
fn western_and_era_dates_agree() {
    let western = extract_all_dates("今日は2019-04-03です。");
    let era = extract_all_dates("今日は平成三一年四月三日です。");

    let expected = CompositeDate::new(
        Some(Year::absolute(2019)),
        Some(Month::absolute(4)),
        Some(Day::absolute(3)),
    );

    assert_eq!(western.len(), 1);
    assert_eq!(era.len(), 1);
    assert_eq!(western[0].span, (3, 13));
    assert_eq!(era[0].span, (3, 12));
    assert_eq!(western[0].get(DATE), Some(&FieldValue::Date(expected)));
    assert_eq!(era[0].get(DATE), Some(&FieldValue::Date(expected)));
    assert_eq!(western[0].get(DATE_STRING), Some(&field("2019-04-03")));
    assert_eq!(era[0].get(DATE_STRING), Some(&field("平成三一年四月三日")));

    for key in [DATE_YEAR, DATE_MONTH, DATE_DAY] {
        assert_eq!(western[0].get(key), era[0].get(key), "{key}");
    }
}

#[test]
fn mixed_postal_codes_in_text_order() {
    let text = "\"今の郵便コードが二二二の一二一二です。
        前の所はT３３３ー３２３２だったし、実家は〒444-1212だった。";

    let expected = [
        ((9, 17), "二二二の一二一二", "2221212"),
        ((33, 42), "T３３３ー３２３２", "3333232"),
        ((50, 59), "〒444-1212", "4441212"),
    ];
    let expected: Vec<ExtractedMatch> = expected
        .iter()
        .map(|(span, string, code)| {
            let mut fields = Fields::new();
            fields.insert(POSTAL_CODE_STRING.to_string(), field(string));
            fields.insert(
                POSTAL_CODE_VALUE.to_string(),
                FieldValue::PostalCode(PostalCode::from_string(code).unwrap()),
            );
            ExtractedMatch::new(*span, fields)
        })
        .collect();

    assert_eq!(extract_all_postal_codes(text), expected);
    assert!(extract_all_phone_numbers(text).is_empty());
}

#[test]
fn repeated_extraction_is_identical() {
    let text = "来年十二月三十一日の午後十一時半、〒100-0001 東京都千代田区。03-1234-5678まで。";

    assert_eq!(extract_all_dates(text), extract_all_dates(text));
    assert_eq!(extract_all_times(text), extract_all_times(text));
    assert_eq!(extract_all_postal_codes(text), extract_all_postal_codes(text));
    assert_eq!(extract_all_phone_numbers(text), extract_all_phone_numbers(text));

    let parser = DocumentParser::new();
    let first = parser.parse(text);
    let second = parser.parse(text);
    assert_eq!(first.dates, second.dates);
    assert_eq!(first.times, second.times);
    assert_eq!(first.postal_codes, second.postal_codes);
    assert_eq!(first.phone_numbers, second.phone_numbers);
}

#[test]
fn entities_from_one_document() {
    let text = "来年十二月三十一日の午後十一時半、〒100-0001 東京都千代田区。03-1234-5678まで。";

    assert_eq!(
        extract_dates(text),
        vec![CompositeDate::new(
            Some(Year::relative(1)),
            Some(Month::absolute(12)),
            Some(Day::absolute(31))
        )]
    );
    assert_eq!(
        extract_times(text),
        vec![chrono::NaiveTime::from_hms_opt(23, 30, 0).unwrap()]
    );
    assert_eq!(extract_postal_codes(text), vec![PostalCode::from_string("1000001").unwrap()]);
    assert_eq!(
        extract_all_phone_numbers(text)[0].get("phone_number_value"),
        Some(&field("0312345678"))
    );
}

#[test]
fn extractors_are_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| extract_dates("2019-04-03と2020-05-06")))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 2);
    }
}

#[test]
fn configured_locale_changes_patterns() {
    let mut config = SuujiConfig::default();
    config.locale.prefixes.relative_year.push(suuji_core::models::RelativeToken::new("翌年", 1));

    let extractor = DateExtractor::from_config(&config).unwrap();
    let date = extractor.extract("翌年三月").unwrap();
    assert_eq!(date.value.year, Some(Year::relative(1)));

    let default = DateExtractor::new(&LocaleTables::default(), &config.eras).unwrap();
    let date = default.extract("翌年三月").unwrap();
    assert_eq!(date.value.year, None);
}
