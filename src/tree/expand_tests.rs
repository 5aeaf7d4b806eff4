//! Tests for IP variant expansion.

use super::expand::{expand_variants, substitute_ip, variant_name};
use super::{FieldValue, Fields, IpSet};

fn http_fields(url: &str) -> Fields {
    [("type", "http"), ("url", url)].into_iter().collect()
}

mod naming {
    use super::*;

    #[test]
    fn v4_keeps_base_name() {
        assert_eq!(variant_name("api", "v4"), "api");
    }

    #[test]
    fn other_labels_are_suffixed() {
        assert_eq!(variant_name("api", "v6"), "api - v6");
        assert_eq!(variant_name("api", "lan"), "api - lan");
    }

    #[test]
    fn label_match_is_exact() {
        assert_eq!(variant_name("api", "V4"), "api - V4");
        assert_eq!(variant_name("api", "v4 "), "api - v4 ");
    }
}

mod substitution {
    use super::*;

    #[test]
    fn replaces_token_in_text_columns() {
        let fields = substitute_ip(&http_fields("http://$$IP$$/health"), "10.0.0.1");
        assert_eq!(
            fields.get("url"),
            Some(&FieldValue::from("http://10.0.0.1/health"))
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let fields = substitute_ip(&http_fields("http://$$IP$$/?via=$$IP$$"), "::1");
        assert_eq!(fields.get("url"), Some(&FieldValue::from("http://::1/?via=::1")));
    }

    #[test]
    fn leaves_values_without_token_untouched() {
        let fields = substitute_ip(&http_fields("http://static.example/"), "10.0.0.1");
        assert_eq!(fields, http_fields("http://static.example/"));
    }

    #[test]
    fn leaves_non_text_values_untouched() {
        let mut fields = http_fields("http://$$IP$$/");
        fields.set("maxretries", 3_i64);
        fields.set("active", true);

        let out = substitute_ip(&fields, "10.0.0.1");
        assert_eq!(out.get("maxretries"), Some(&FieldValue::Integer(3)));
        assert_eq!(out.get("active"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn keeps_column_order() {
        let out = substitute_ip(&http_fields("http://$$IP$$/"), "10.0.0.1");
        let columns: Vec<_> = out.columns().collect();
        assert_eq!(columns, vec!["type", "url"]);
    }
}

mod expansion {
    use super::*;

    #[test]
    fn no_ips_yields_declaration_unchanged() {
        let fields = http_fields("http://$$IP$$/");
        let rows = expand_variants("api", &fields, None);

        assert_eq!(rows, vec![("api".to_string(), fields)]);
    }

    #[test]
    fn empty_ips_yields_declaration_unchanged() {
        let fields = http_fields("http://$$IP$$/");
        let rows = expand_variants("api", &fields, Some(&IpSet::new()));

        assert_eq!(rows, vec![("api".to_string(), fields)]);
    }

    #[test]
    fn one_row_per_variant() {
        let ips: IpSet = [("v4", "1.2.3.4"), ("v6", "::1")].into_iter().collect();
        let rows = expand_variants("api", &http_fields("http://$$IP$$/health"), Some(&ips));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "api");
        assert_eq!(
            rows[0].1.get("url"),
            Some(&FieldValue::from("http://1.2.3.4/health"))
        );
        assert_eq!(rows[1].0, "api - v6");
        assert_eq!(
            rows[1].1.get("url"),
            Some(&FieldValue::from("http://::1/health"))
        );
    }

    #[test]
    fn only_v6_variant_is_still_suffixed() {
        let ips: IpSet = [("v6", "::1")].into_iter().collect();
        let rows = expand_variants("api", &http_fields("http://$$IP$$/"), Some(&ips));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "api - v6");
    }
}
