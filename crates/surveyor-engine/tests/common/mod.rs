#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use surveyor_browser::{BrowserActions, BrowserError, Control, ControlHandle, Result};
use surveyor_core::{AppConfig, SelectorConfig};

/// Driver calls, in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Navigate(String),
    Select { group: String, value: String },
    Type { group: String, text: String },
    Click { group: String, value: String, label: String },
    Check { group: String, value: String, label: String },
    WaitForNavigation,
}

/// Static page structure: selector -> matching controls.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: HashMap<String, Vec<Control>>,
}

impl FakePage {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with(mut self, selector: &str, controls: Vec<(&str, &str, &str)>) -> Self {
        let controls = controls
            .into_iter()
            .enumerate()
            .map(|(i, (group, value, label))| {
                Control::new(ControlHandle::new(selector, i), value, group, label)
            })
            .collect();
        self.elements.insert(selector.to_string(), controls);
        self
    }

    pub fn marker(self, selector: &str) -> Self {
        self.with(selector, vec![(selector, "", "")])
    }

    pub fn entry_form(sel: &SelectorConfig) -> Self {
        Self::default()
            .with(&sel.entry_hour, vec![("InputHour", "", "Hour")])
            .with(&sel.entry_minute, vec![("InputMinute", "", "Minute")])
            .with(&sel.entry_store_number, vec![("InputStoreNum", "", "Store")])
            .with(&sel.entry_survey_code, vec![("CN1", "", "Survey code")])
            .marker(&sel.next_button)
    }

    /// Rating grid where each question lists its available values.
    pub fn rating_grid(sel: &SelectorConfig, questions: &[(&str, &[&str])]) -> Self {
        let controls = questions
            .iter()
            .flat_map(|(group, values)| values.iter().map(move |v| (*group, *v, "")))
            .collect();
        Self::default()
            .marker(&sel.rating_grid)
            .with(&sel.rating_controls, controls)
            .marker(&sel.next_button)
    }

    /// Checkbox grid where each question lists its option labels.
    pub fn checkbox_grid(sel: &SelectorConfig, questions: &[(&str, &[&str])]) -> Self {
        let controls = questions
            .iter()
            .flat_map(|(group, labels)| labels.iter().map(move |l| (*group, "", *l)))
            .collect();
        Self::default()
            .marker(&sel.checkbox_grid)
            .with(&sel.checkbox_controls, controls)
            .marker(&sel.next_button)
    }

    pub fn terminal(sel: &SelectorConfig) -> Self {
        Self::default().marker(&sel.finish)
    }

    pub fn without(mut self, selector: &str) -> Self {
        self.elements.remove(selector);
        self
    }

    fn contains(&self, control: &Control) -> bool {
        self.elements
            .get(control.handle.selector())
            .and_then(|controls| controls.get(control.handle.index()))
            .is_some()
    }
}

/// In-memory driver presenting a fixed sequence of pages.
///
/// `wait_for_navigation` moves to the next page (staying on the last one);
/// `navigate` rewinds to the first. Checkbox and radio state is kept per
/// page: clicking a checkbox toggles it like a browser does, `check` only
/// ever ticks.
pub struct ScriptedDriver {
    selectors: SelectorConfig,
    pages: Vec<FakePage>,
    current: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
    blackout_rounds: Mutex<u32>,
    in_blackout: Mutex<bool>,
    failing_clicks: Mutex<u32>,
    fail_action_at: Option<u32>,
    attempted_actions: Mutex<u32>,
    fail_navigation: bool,
    ticked: Mutex<HashSet<(usize, String, usize)>>,
    answers: Mutex<HashMap<(usize, String), String>>,
    classifications: Mutex<u32>,
}

impl ScriptedDriver {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            selectors: SelectorConfig::default(),
            pages,
            current: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
            blackout_rounds: Mutex::new(0),
            in_blackout: Mutex::new(false),
            failing_clicks: Mutex::new(0),
            fail_action_at: None,
            attempted_actions: Mutex::new(0),
            fail_navigation: false,
            ticked: Mutex::new(HashSet::new()),
            answers: Mutex::new(HashMap::new()),
            classifications: Mutex::new(0),
        }
    }

    /// The first `rounds` classifications see an empty, still-rendering page.
    pub fn with_blackout(self, rounds: u32) -> Self {
        *self.blackout_rounds.lock().unwrap() = rounds;
        self
    }

    /// The next `count` clicks or checks report a stale control.
    pub fn with_failing_clicks(self, count: u32) -> Self {
        *self.failing_clicks.lock().unwrap() = count;
        self
    }

    /// Only the `n`-th click or check (counting from 1) reports a stale
    /// control, so earlier actions on the page have already landed.
    pub fn with_failing_action_at(mut self, n: u32) -> Self {
        self.fail_action_at = Some(n);
        self
    }

    /// `wait_for_navigation` always fails.
    pub fn with_failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Navigate(_)))
            .count()
    }

    pub fn clicks(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Click { .. }))
            .collect()
    }

    /// Clicks and checks, in order.
    pub fn activations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Click { .. } | Call::Check { .. }))
            .collect()
    }

    /// `(group, label)` of every box ticked on page `page` at the end.
    pub fn ticked(&self, page: usize) -> Vec<(String, String)> {
        let ticked = self.ticked.lock().unwrap();
        let Some(fake) = self.pages.get(page) else {
            return Vec::new();
        };
        let mut boxes: Vec<_> = fake
            .elements
            .iter()
            .flat_map(|(selector, controls)| {
                controls
                    .iter()
                    .filter(|c| ticked.contains(&(page, selector.clone(), c.handle.index())))
                    .map(|c| (c.group.clone(), c.label.clone()))
            })
            .collect();
        boxes.sort();
        boxes
    }

    /// Value of the radio chosen for `group` on page `page`.
    pub fn answer(&self, page: usize, group: &str) -> Option<String> {
        self.answers
            .lock()
            .unwrap()
            .get(&(page, group.to_string()))
            .cloned()
    }

    /// Classification rounds observed (each round starts with the finish marker).
    pub fn classifications(&self) -> u32 {
        *self.classifications.lock().unwrap()
    }

    fn current(&self) -> usize {
        *self.current.lock().unwrap()
    }

    fn page(&self) -> FakePage {
        self.pages.get(self.current()).cloned().unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn lookup(&self, selector: &str) -> Vec<Control> {
        if selector == self.selectors.finish {
            *self.classifications.lock().unwrap() += 1;
            let mut rounds = self.blackout_rounds.lock().unwrap();
            let active = *rounds > 0;
            if active {
                *rounds -= 1;
            }
            *self.in_blackout.lock().unwrap() = active;
        }

        if *self.in_blackout.lock().unwrap() {
            return Vec::new();
        }
        let page = self.current();
        let ticked = self.ticked.lock().unwrap();
        self.page()
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|c| {
                let checked = ticked.contains(&(page, selector.to_string(), c.handle.index()));
                c.with_checked(checked)
            })
            .collect()
    }

    /// Shared failure injection for clicks and checks. Returns the page index.
    fn activate(&self, control: &Control) -> Result<usize> {
        let attempt = {
            let mut attempted = self.attempted_actions.lock().unwrap();
            *attempted += 1;
            *attempted
        };
        let stale = {
            let mut failing = self.failing_clicks.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                true
            } else {
                self.fail_action_at == Some(attempt)
            }
        };
        if stale {
            return Err(BrowserError::ControlNotFound {
                group: control.group.clone(),
                selector: control.handle.to_string(),
            });
        }
        self.ensure_present(control)?;
        Ok(self.current())
    }

    fn ensure_present(&self, control: &Control) -> Result<()> {
        if self.page().contains(control) {
            Ok(())
        } else {
            Err(BrowserError::ControlNotFound {
                group: control.group.clone(),
                selector: control.handle.to_string(),
            })
        }
    }
}

#[async_trait::async_trait]
impl BrowserActions for ScriptedDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(Call::Navigate(url.to_string()));
        *self.current.lock().unwrap() = 0;
        Ok(())
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Control>> {
        Ok(self.lookup(selector).into_iter().next())
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Control>> {
        Ok(self.lookup(selector))
    }

    async fn click(&self, control: &Control) -> Result<()> {
        let page = self.activate(control)?;
        let selector = control.handle.selector();

        if selector == self.selectors.checkbox_controls {
            let key = (page, selector.to_string(), control.handle.index());
            let mut ticked = self.ticked.lock().unwrap();
            if !ticked.remove(&key) {
                ticked.insert(key);
            }
        } else if selector == self.selectors.rating_controls {
            self.answers
                .lock()
                .unwrap()
                .insert((page, control.group.clone()), control.value.clone());
        }

        self.record(Call::Click {
            group: control.group.clone(),
            value: control.value.clone(),
            label: control.label.clone(),
        });
        Ok(())
    }

    async fn check(&self, control: &Control) -> Result<()> {
        let page = self.activate(control)?;
        self.ticked.lock().unwrap().insert((
            page,
            control.handle.selector().to_string(),
            control.handle.index(),
        ));
        self.record(Call::Check {
            group: control.group.clone(),
            value: control.value.clone(),
            label: control.label.clone(),
        });
        Ok(())
    }

    async fn type_text(&self, control: &Control, text: &str) -> Result<()> {
        self.ensure_present(control)?;
        self.record(Call::Type {
            group: control.group.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn select(&self, control: &Control, value: &str) -> Result<()> {
        self.ensure_present(control)?;
        self.record(Call::Select {
            group: control.group.clone(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        if self.fail_navigation {
            return Err(BrowserError::Timeout("waiting for next page".to_string()));
        }
        self.record(Call::WaitForNavigation);
        let mut current = self.current.lock().unwrap();
        if *current + 1 < self.pages.len() {
            *current += 1;
        }
        Ok(())
    }
}

/// Default config with short delays and a fixed seed.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.survey.start_url = "https://survey.test/".to_string();
    config.traversal.unknown_retry_delay_ms = 1;
    config.traversal.rng_seed = Some(7);
    config
}

/// Entry form, one rating grid, one checkbox grid, finish screen.
pub fn standard_survey(sel: &SelectorConfig) -> Vec<FakePage> {
    vec![
        FakePage::entry_form(sel),
        FakePage::rating_grid(
            sel,
            &[
                ("R000005", &["1", "2", "3", "4", "5"][..]),
                ("R000012", &["1", "2"][..]),
            ],
        ),
        FakePage::checkbox_grid(
            sel,
            &[(
                "R000040",
                &["Groceries", "Household", "Other (please specify)", "Snacks"][..],
            )],
        ),
        FakePage::terminal(sel),
    ]
}
