mod common;

use common::{FakePage, ScriptedDriver};
use surveyor_core::SelectorConfig;
use surveyor_engine::{classify, PageKind};

async fn classify_page(page: FakePage) -> PageKind {
    let driver = ScriptedDriver::new(vec![page]);
    classify(&driver, &SelectorConfig::default())
        .await
        .expect("classify")
}

#[tokio::test]
async fn test_terminal_wins_over_rating_grid() {
    let sel = SelectorConfig::default();
    let page = FakePage::rating_grid(&sel, &[("R1", &["5"][..])]).marker(&sel.finish);
    assert_eq!(classify_page(page).await, PageKind::Terminal);
}

#[tokio::test]
async fn test_terminal_wins_over_everything() {
    let sel = SelectorConfig::default();
    let page = FakePage::entry_form(&sel)
        .marker(&sel.rating_grid)
        .marker(&sel.checkbox_grid)
        .marker(&sel.finish);
    assert_eq!(classify_page(page).await, PageKind::Terminal);
}

#[tokio::test]
async fn test_rating_grid_wins_over_checkbox_grid() {
    let sel = SelectorConfig::default();
    let page = FakePage::checkbox_grid(&sel, &[("C1", &["Snacks"][..])]).marker(&sel.rating_grid);
    assert_eq!(classify_page(page).await, PageKind::RatingGrid);
}

#[tokio::test]
async fn test_each_kind_recognised() {
    let sel = SelectorConfig::default();
    assert_eq!(
        classify_page(FakePage::entry_form(&sel)).await,
        PageKind::EntryForm
    );
    assert_eq!(
        classify_page(FakePage::rating_grid(&sel, &[("R1", &["1", "2"][..])])).await,
        PageKind::RatingGrid
    );
    assert_eq!(
        classify_page(FakePage::checkbox_grid(&sel, &[("C1", &["Snacks"][..])])).await,
        PageKind::CheckboxGrid
    );
    assert_eq!(classify_page(FakePage::terminal(&sel)).await, PageKind::Terminal);
    assert_eq!(classify_page(FakePage::unknown()).await, PageKind::Unknown);
}

#[tokio::test]
async fn test_entry_form_recognised_before_code_field_renders() {
    let sel = SelectorConfig::default();
    let page = FakePage::entry_form(&sel).without(&sel.entry_survey_code);
    assert_eq!(classify_page(page).await, PageKind::EntryForm);
}

#[tokio::test]
async fn test_lone_next_button_is_unknown() {
    let sel = SelectorConfig::default();
    let page = FakePage::unknown().marker(&sel.next_button);
    assert_eq!(classify_page(page).await, PageKind::Unknown);
}

#[tokio::test]
async fn test_classification_is_repeatable() {
    let sel = SelectorConfig::default();
    let driver = ScriptedDriver::new(vec![FakePage::checkbox_grid(
        &sel,
        &[("C1", &["Snacks"][..])],
    )]);
    let first = classify(&driver, &sel).await.unwrap();
    let second = classify(&driver, &sel).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_alternate_layout_by_substitution() {
    let sel = SelectorConfig {
        finish: "#thanks".to_string(),
        ..SelectorConfig::default()
    };
    let driver = ScriptedDriver::new(vec![FakePage::unknown().marker("#thanks")]);
    assert_eq!(classify(&driver, &sel).await.unwrap(), PageKind::Terminal);
}
