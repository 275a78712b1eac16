use super::*;

#[test]
fn one_warning_per_layer_and_code() {
    let mut d = Diagnostics::default();
    let kind = || WarningKind::MalformedEffect {
        effect: "drop_shadow".to_string(),
        reason: "size must be finite".to_string(),
    };
    assert!(d.warn(LayerId(0), "a", kind()));
    assert!(!d.warn(LayerId(0), "a", kind()));
    assert!(d.warn(LayerId(1), "b", kind()));
    assert!(d.warn(LayerId(0), "a", WarningKind::StrokeOnBooleanShape));
    assert_eq!(d.warnings().len(), 3);
}

#[test]
fn display_names_the_layer() {
    let w = Warning {
        layer: LayerId(3),
        layer_name: "Star".to_string(),
        kind: WarningKind::UnsupportedBlend {
            mode: "hard_mix".to_string(),
            substitute: "normal".to_string(),
        },
    };
    let s = w.to_string();
    assert!(s.starts_with("layer 'Star':"), "{s}");
    assert!(s.contains("hard_mix"), "{s}");
}

#[test]
fn warnings_serialize_with_code_tag() {
    let mut d = Diagnostics::default();
    d.warn(
        LayerId(2),
        "x",
        WarningKind::ClipDegraded {
            reason: "no sub-paths".to_string(),
        },
    );
    let json = serde_json::to_value(d.into_warnings()).unwrap();
    assert_eq!(json[0]["kind"]["code"], "clip_degraded");
    assert_eq!(json[0]["layer"], 2);
}
