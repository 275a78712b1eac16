use super::*;

#[test]
fn classification_is_total_and_disjoint() {
    let mut native = 0;
    let mut approx = 0;
    let mut unsupported = 0;
    for mode in BlendMode::ALL {
        match map_blend(mode) {
            BlendMapping::Native(_) => native += 1,
            BlendMapping::Approximate(_) => approx += 1,
            BlendMapping::Unsupported(_) => unsupported += 1,
        }
    }
    assert_eq!(native + approx + unsupported, BlendMode::ALL.len());
    assert_eq!((native, approx, unsupported), (17, 5, 6));
}

#[test]
fn classification_is_stable() {
    let mapper = CssBlendMapper;
    for mode in BlendMode::ALL {
        assert_eq!(mapper.map(mode), mapper.map(mode), "{}", mode.name());
    }
}

#[test]
fn representative_entries() {
    assert_eq!(map_blend(BlendMode::Multiply), BlendMapping::Native(CssBlend::Multiply));
    assert_eq!(
        map_blend(BlendMode::LinearDodge),
        BlendMapping::Approximate(CssBlend::Screen)
    );
    assert_eq!(
        map_blend(BlendMode::VividLight),
        BlendMapping::Unsupported(CssBlend::ColorDodge)
    );
    assert_eq!(map_blend(BlendMode::PassThrough).css(), CssBlend::Normal);
}

#[test]
fn style_only_for_non_normal() {
    assert_eq!(CssBlend::Normal.style(), None);
    assert_eq!(
        CssBlend::ColorBurn.style().as_deref(),
        Some("mix-blend-mode:color-burn")
    );
}
