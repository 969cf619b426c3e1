use super::*;

#[test]
fn table_fitting_without_scroll_unlocks_at_load() -> Result<()> {
    let mut page = ConsentPage::parse(CONSENT_FORM_HTML)?;
    page.set_scroll_metrics(".fr-table__content", 200.0, 200.0)?;
    page.assert_disabled("#btn-validate", true)?;
    page.assert_displayed("#alert-validate", true)?;

    page.finish_loading()?;
    assert_eq!(page.gate_state(), GateState::Unlocked);
    page.assert_disabled("#btn-validate", false)?;
    page.assert_displayed("#alert-validate", false)?;
    assert_eq!(page.listener_count("scroll"), 0);
    Ok(())
}

#[test]
fn scroll_gate_unlocks_only_at_the_end() -> Result<()> {
    let mut page = scrollable_form(500.0, 200.0)?;
    assert_eq!(page.gate_state(), GateState::Locked);
    page.assert_disabled("#btn-validate", true)?;
    assert_eq!(page.listener_count("scroll"), 1);

    page.scroll_to(".fr-table__content", 150.0)?;
    assert_eq!(page.gate_state(), GateState::Locked);
    page.assert_disabled("#btn-validate", true)?;
    page.assert_displayed("#alert-validate", true)?;

    page.scroll_to(".fr-table__content", 300.0)?;
    assert_eq!(page.gate_state(), GateState::Unlocked);
    page.assert_disabled("#btn-validate", false)?;
    page.assert_displayed("#alert-validate", false)?;
    Ok(())
}

#[test]
fn unlock_is_never_undone_by_scrolling_back() -> Result<()> {
    let mut page = scrollable_form(500.0, 200.0)?;
    page.scroll_to(".fr-table__content", 300.0)?;
    page.scroll_to(".fr-table__content", 0.0)?;
    page.scroll_by(".fr-table__content", 40.0)?;

    assert_eq!(page.gate_state(), GateState::Unlocked);
    page.assert_disabled("#btn-validate", false)?;
    page.assert_displayed("#alert-validate", false)?;
    Ok(())
}

#[test]
fn overshooting_scroll_is_clamped_and_unlocks() -> Result<()> {
    let mut page = scrollable_form(500.0, 200.0)?;
    page.scroll_to(".fr-table__content", 10_000.0)?;
    assert_eq!(page.scroll_metrics(".fr-table__content")?.scroll_top, 300.0);
    assert_eq!(page.gate_state(), GateState::Unlocked);
    Ok(())
}

#[test]
fn fractional_metrics_unlock_at_the_end() -> Result<()> {
    let mut page = scrollable_form(500.5, 200.25)?;
    page.scroll_by(".fr-table__content", 300.0)?;
    assert_eq!(page.gate_state(), GateState::Locked);
    page.scroll_by(".fr-table__content", 0.25)?;
    assert_eq!(page.gate_state(), GateState::Unlocked);
    Ok(())
}

#[test]
fn end_check_tolerates_sub_pixel_overshoot() {
    let metrics = ScrollMetrics {
        scroll_top: 299.75,
        scroll_height: 499.5,
        client_height: 200.0,
    };
    assert!(metrics.is_scrolled_to_end());

    let short = ScrollMetrics {
        scroll_top: 299.0,
        ..metrics
    };
    assert!(!short.is_scrolled_to_end());
}

#[test]
fn scroll_without_movement_fires_no_event() -> Result<()> {
    let mut page = scrollable_form(500.0, 200.0)?;
    page.enable_trace(true);
    page.scroll_to(".fr-table__content", 0.0)?;
    assert!(page.take_trace_logs().is_empty());

    page.scroll_by(".fr-table__content", 10.0)?;
    assert_eq!(
        page.take_trace_logs(),
        vec!["[event] scroll target=div".to_string()]
    );
    Ok(())
}

#[test]
fn missing_region_keeps_gate_locked() -> Result<()> {
    let html = r#"
        <div id="alert-validate">Faites défiler</div>
        <button id="btn-validate" disabled>Valider</button>
        "#;

    let page = ConsentPage::from_html(html)?;
    assert_eq!(page.gate_state(), GateState::Locked);
    page.assert_disabled("#btn-validate", true)?;
    page.assert_displayed("#alert-validate", true)?;
    assert_eq!(page.listener_count("scroll"), 0);
    Ok(())
}

#[test]
fn missing_button_and_alert_do_not_block_the_transition() -> Result<()> {
    let html = r#"<div class="fr-table__content"><table></table></div>"#;

    let mut page = ConsentPage::parse(html)?;
    page.set_scroll_metrics(".fr-table__content", 800.0, 300.0)?;
    page.finish_loading()?;
    page.scroll_to(".fr-table__content", 500.0)?;
    assert_eq!(page.gate_state(), GateState::Unlocked);
    Ok(())
}

#[test]
fn unlock_preserves_other_inline_styles() -> Result<()> {
    let html = r#"
        <div class="fr-table__content"></div>
        <div id="alert-validate" style="color: red">scroll</div>
        <button id="btn-validate" disabled>Valider</button>
        "#;

    let page = ConsentPage::from_html(html)?;
    assert_eq!(
        page.dump_dom("#alert-validate")?,
        r#"<div id="alert-validate" style="color: red; display: none;">scroll</div>"#
    );
    assert_eq!(
        page.dump_dom("#btn-validate")?,
        r#"<button id="btn-validate">Valider</button>"#
    );
    Ok(())
}

#[test]
fn scroll_events_on_other_elements_are_ignored() -> Result<()> {
    let html = r#"
        <div id="sidebar"></div>
        <div class="fr-table__content"></div>
        <button id="btn-validate" disabled>Valider</button>
        "#;

    let mut page = ConsentPage::parse(html)?;
    page.set_scroll_metrics(".fr-table__content", 500.0, 200.0)?;
    page.set_scroll_metrics("#sidebar", 500.0, 200.0)?;
    page.finish_loading()?;

    page.scroll_to("#sidebar", 300.0)?;
    assert_eq!(page.gate_state(), GateState::Locked);
    page.assert_disabled("#btn-validate", true)?;
    Ok(())
}

#[test]
fn gate_driven_directly_through_the_document_abstraction() -> Result<()> {
    let page = scrollable_form(500.0, 200.0)?;
    let mut gate = ScrollGate::new(page.config());
    assert_eq!(gate.state(), GateState::Locked);
    assert_eq!(gate.region(), None);

    let mut dom = html::parse_html(CONSENT_FORM_HTML)?;
    let region = dom
        .query_selector(".fr-table__content")?
        .ok_or_else(|| Error::SelectorNotFound(".fr-table__content".into()))?;
    dom.set_scroll_extent(region, 500.0, 200.0)?;

    assert_eq!(gate.on_ready(&mut dom)?, GateSetup::Observing(region));
    dom.set_scroll_top(region, 299.0)?;
    assert_eq!(gate.on_scroll(&mut dom)?, GateTransition::Unchanged);
    dom.set_scroll_top(region, 300.0)?;
    assert_eq!(gate.on_scroll(&mut dom)?, GateTransition::Unlocked);
    assert_eq!(gate.on_scroll(&mut dom)?, GateTransition::Unchanged);
    assert!(!dom.is_effectively_disabled(
        dom.by_id("btn-validate")
            .ok_or_else(|| Error::SelectorNotFound("#btn-validate".into()))?
    ));
    Ok(())
}

#[test]
fn disabling_keeps_flag_and_attribute_in_step() -> Result<()> {
    let mut dom = html::parse_html(r#"<button id="btn-validate" disabled>Valider</button>"#)?;
    let button = dom
        .by_id("btn-validate")
        .ok_or_else(|| Error::SelectorNotFound("#btn-validate".into()))?;

    dom.set_disabled(button, false)?;
    assert!(!dom.disabled(button));
    assert_eq!(dom.attr(button, "disabled"), None);
    assert_eq!(dom.by_id("btn-validate"), Some(button));

    dom.set_disabled(button, true)?;
    assert!(dom.disabled(button));
    assert_eq!(
        dom.outer_html(button),
        r#"<button disabled="" id="btn-validate">Valider</button>"#
    );
    Ok(())
}
