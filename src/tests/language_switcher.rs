use super::*;

#[test]
fn language_click_writes_cookie_and_reloads() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.click(".fr-translate__language[lang=en]")?;

    assert_eq!(page.location_reload_count(), 1);
    assert_eq!(page.document_cookie(), "django_language=en");
    let cookie = page
        .cookies()
        .get("django_language")
        .ok_or_else(|| Error::SelectorNotFound("django_language cookie".into()))?;
    assert_eq!(
        cookie.to_string(),
        "django_language=en; Path=/django-dsfr; SameSite=Strict"
    );
    assert_eq!(page.ready_state(), ReadyState::Complete);
    Ok(())
}

#[test]
fn switching_twice_replaces_the_cookie() -> Result<()> {
    let mut page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    page.click(".fr-translate__language[lang=en]")?;
    page.click(".fr-translate__language[lang=fr]")?;

    assert_eq!(page.location_reload_count(), 2);
    assert_eq!(page.cookies().len(), 1);
    assert_eq!(page.document_cookie(), "django_language=fr");
    Ok(())
}

#[test]
fn reload_resets_page_state_but_keeps_cookie_and_layout() -> Result<()> {
    let mut page = scrollable_form(500.0, 200.0)?;
    page.set_checked("#toggle-all", true)?;
    page.focus("#pdl-1")?;
    page.scroll_to(".fr-table__content", 300.0)?;
    assert_eq!(page.gate_state(), GateState::Unlocked);

    page.click(".fr-translate__language[lang=en]")?;

    assert_eq!(page.location_reload_count(), 1);
    assert_eq!(page.document_cookie(), "django_language=en");
    assert_eq!(page.gate_state(), GateState::Locked);
    page.assert_disabled("#btn-validate", true)?;
    page.assert_displayed("#alert-validate", true)?;
    page.assert_checked("#toggle-all", false)?;
    page.assert_text("#checked-count", "0")?;
    assert_eq!(page.active_element_id(), None);

    let metrics = page.scroll_metrics(".fr-table__content")?;
    assert_eq!(metrics, ScrollMetrics::new(500.0, 200.0));
    assert_eq!(page.listener_count("scroll"), 1);
    assert_eq!(page.listener_count("click"), 2);
    Ok(())
}

#[test]
fn option_without_lang_is_ignored() -> Result<()> {
    let html = r#"
        <button class="fr-translate__language" id="no-lang">?</button>
        <button class="fr-translate__language" id="bad-lang" lang="fr;Path=/">!</button>
        <button class="fr-translate__language" id="regional" lang="pt-BR">pt</button>
        "#;

    let mut page = ConsentPage::from_html(html)?;
    page.click("#no-lang")?;
    page.click("#bad-lang")?;
    assert_eq!(page.location_reload_count(), 0);
    assert!(page.cookies().is_empty());

    page.click("#regional")?;
    assert_eq!(page.document_cookie(), "django_language=pt-BR");
    Ok(())
}

#[test]
fn click_on_nested_content_reaches_the_option() -> Result<()> {
    let html = r##"
        <a class="fr-translate__language" lang="en" href="#"><span id="label">English</span></a>
        "##;

    let mut page = ConsentPage::from_html(html)?;
    page.click("#label")?;
    assert_eq!(page.document_cookie(), "django_language=en");
    Ok(())
}

#[test]
fn switcher_binds_only_once_interactive() -> Result<()> {
    let mut page = ConsentPage::parse(CONSENT_FORM_HTML)?;
    assert_eq!(page.ready_state(), ReadyState::Loading);
    assert_eq!(page.listener_count("click"), 0);

    page.click(".fr-translate__language[lang=en]")?;
    assert!(page.cookies().is_empty());

    page.finish_loading()?;
    assert_eq!(page.listener_count("click"), 2);
    Ok(())
}

#[test]
fn cookie_settings_come_from_config() -> Result<()> {
    let html = r#"<button class="lang-option" lang="de">Deutsch</button>"#;
    let config = FormConfig {
        language_selector: ".lang-option".into(),
        language_cookie_name: "ui_lang".into(),
        language_cookie_path: "/".into(),
        ..FormConfig::default()
    };

    let mut page = ConsentPage::from_html_with_config(html, config)?;
    page.click(".lang-option")?;
    let cookie = page
        .cookies()
        .iter()
        .next()
        .cloned()
        .ok_or_else(|| Error::SelectorNotFound("ui_lang cookie".into()))?;
    assert_eq!(
        cookie,
        Cookie::new("ui_lang", "de", "/", SameSite::Strict)
    );
    Ok(())
}

#[test]
fn switcher_initializes_once() -> Result<()> {
    let page = ConsentPage::from_html(CONSENT_FORM_HTML)?;
    let mut switcher = LanguageSwitcher::new(page.config());
    assert!(!switcher.is_initialized());
    assert_eq!(switcher.init(page.document())?.len(), 2);
    assert!(switcher.is_initialized());
    assert!(switcher.init(page.document())?.is_empty());
    Ok(())
}
