use super::*;

#[test]
fn breakpoint_is_exclusive() {
    assert_eq!(layout_for(767.9), Layout::Mobile);
    assert_eq!(layout_for(768.0), Layout::Desktop);
    assert_eq!(layout_for(1280.0), Layout::Desktop);
}

#[test]
fn narrow_widths_are_mobile() {
    assert!(layout_for(320.0).is_mobile());
    assert!(layout_for(0.0).is_mobile());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn native_fallbacks_match_server_render() {
    assert_eq!(current_layout(), Layout::Desktop);
    assert!(scroll_y().abs() < f64::EPSILON);
}
