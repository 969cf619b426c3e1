use super::*;

#[test]
fn escape_inside_table_moves_focus_to_sentinel() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#pdl-2")?;
    assert_eq!(page.focus_state()?, FocusState::InsideTable);

    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#focus-after-consents")?;
    assert_eq!(page.focus_state()?, FocusState::AtSentinel);
    Ok(())
}

#[test]
fn escape_on_the_region_itself_counts_as_inside() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus(".fr-table__content")?;
    assert_eq!(page.focus_state()?, FocusState::InsideTable);

    page.press_key(&KeyInput::new("Escape"))?;
    assert_eq!(page.active_element_id().as_deref(), Some("focus-after-consents"));
    Ok(())
}

#[test]
fn repeated_escape_at_sentinel_is_a_no_op() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#toggle-all")?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#focus-after-consents")?;
    Ok(())
}

#[test]
fn escape_outside_table_is_ignored() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#btn-validate")?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#btn-validate")?;
    assert_eq!(page.focus_state()?, FocusState::Outside);
    Ok(())
}

#[test]
fn shift_tab_at_sentinel_returns_to_toggle_all() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#toggle-all")?;
    assert_eq!(page.focus_state()?, FocusState::InsideTable);
    Ok(())
}

#[test]
fn shift_tab_default_action_moves_to_previous_focusable_without_router() -> Result<()> {
    // Renaming the sentinel leaves the router with nothing to intercept.
    let config = FormConfig {
        sentinel_id: "no-such-sentinel".into(),
        ..FormConfig::default()
    };
    let mut page = ConsentPage::from_html_with_config(CONSENT_FORM_HTML, config)?;
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#pdl-3")?;
    Ok(())
}

#[test]
fn plain_tab_at_sentinel_follows_tab_order() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::tab())?;
    page.assert_focused("#btn-validate")?;

    page.press_key(&KeyInput::tab())?;
    assert_eq!(page.active_element_id(), None);
    Ok(())
}

#[test]
fn modified_escape_still_exits_the_table() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.focus("#pdl-1")?;
    page.press_key(&KeyInput::new("Escape").with_ctrl())?;
    page.assert_focused("#focus-after-consents")?;
    Ok(())
}

#[test]
fn missing_sentinel_makes_escape_a_no_op() -> Result<()> {
    let html = r#"
        <div class="fr-table__content">
          <input type="checkbox" id="toggle-all">
          <input type="checkbox" name="status" id="a">
        </div>
        <button id="btn-validate">Valider</button>
        "#;

    let mut page = ConsentPage::from_html(html)?;
    page.focus("#a")?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#a")?;
    Ok(())
}

#[test]
fn missing_region_leaves_router_inert() -> Result<()> {
    let html = r##"
        <input type="checkbox" id="toggle-all">
        <input type="checkbox" name="status" id="a">
        <a id="focus-after-consents" href="#top">after</a>
        "##;

    let mut page = ConsentPage::from_html(html)?;
    page.focus("#a")?;
    assert_eq!(page.focus_state()?, FocusState::Outside);
    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#a")?;

    // The sentinel loop does not depend on the region.
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#toggle-all")?;
    Ok(())
}

#[test]
fn shift_tab_is_suppressed_even_without_reentry_target() -> Result<()> {
    let html = r#"
        <button id="before">before</button>
        <div class="fr-table__content"><input type="checkbox" name="status" id="a"></div>
        <p id="focus-after-consents" tabindex="0">end</p>
        "#;

    let mut page = ConsentPage::from_html(html)?;
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#focus-after-consents")?;
    Ok(())
}

#[test]
fn reentry_target_is_configurable() -> Result<()> {
    let html = r##"
        <a id="focus-before-consents" href="#consents">consents</a>
        <div class="fr-table__content">
          <input type="checkbox" id="toggle-all">
          <input type="checkbox" name="status" id="a">
        </div>
        <p id="focus-after-consents" tabindex="-1">end</p>
        "##;
    let config = FormConfig {
        reentry_target_id: "focus-before-consents".into(),
        ..FormConfig::default()
    };

    let mut page = ConsentPage::from_html_with_config(html, config)?;
    page.focus("#a")?;
    page.press_key(&KeyInput::new("Escape"))?;
    page.assert_focused("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#focus-before-consents")?;
    Ok(())
}

#[test]
fn disabled_reentry_target_cannot_take_focus() -> Result<()> {
    let html = r#"
        <div class="fr-table__content">
          <input type="checkbox" id="toggle-all" disabled>
          <input type="checkbox" name="status" id="a">
        </div>
        <p id="focus-after-consents" tabindex="0">end</p>
        "#;

    let mut page = ConsentPage::from_html(html)?;
    page.focus("#focus-after-consents")?;
    page.press_key(&KeyInput::shift_tab())?;
    page.assert_focused("#focus-after-consents")?;
    Ok(())
}

#[test]
fn router_outcomes_report_what_happened() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    let router = FocusRouter::new(page.config());

    page.focus("#pdl-1")?;
    assert_eq!(router.state(page.document())?, FocusState::InsideTable);
    assert!(!RouteOutcome::ExitedRegion.prevents_default());
    assert!(RouteOutcome::ReturnedToStart.prevents_default());
    assert!(RouteOutcome::ReentryTargetMissing.prevents_default());
    assert!(!RouteOutcome::Ignored.prevents_default());

    page.enable_trace(true);
    page.set_trace_events(false);
    page.press_key(&KeyInput::new("Escape"))?;
    page.press_key(&KeyInput::shift_tab())?;
    assert_eq!(
        page.take_trace_logs(),
        vec![
            "[focus] Escape ExitedRegion active=#focus-after-consents".to_string(),
            "[focus] Shift+Tab ReturnedToStart active=#toggle-all".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn keydown_without_focus_targets_body() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.enable_trace(true);
    page.press_key(&KeyInput::new("Escape"))?;
    assert_eq!(
        page.take_trace_logs(),
        vec!["[event] keydown target=body".to_string()]
    );
    assert_eq!(page.active_element_id(), None);
    Ok(())
}
