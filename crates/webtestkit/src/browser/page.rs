// PageHandle - semantic element actions over one CDP page
//
// Every action takes a declarative Locator and resolves it fresh inside a
// bounded wait, then forwards a single engine primitive. Interactions the
// engine exposes natively (click, typing, key presses, focus, scrolling)
// go through the element API; state queries and the remaining interactions
// are one-line JS evaluations against the resolved selector. Exceeding the
// deadline aborts only the call that timed out.

use crate::browser::action_options::{
    ClickOptions, ElementState, KeyboardModifier, MouseButton, PressOptions, TypeOptions,
    WaitOptions,
};
use crate::browser::locator::Locator;
use crate::browser::session::BrowserSession;
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Poll interval while waiting for an element or state.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result shape shared by all JS element probes.
#[derive(Debug, Deserialize)]
struct Probe {
    found: bool,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

/// Visibility probe result.
#[derive(Debug, Deserialize)]
struct StateProbe {
    attached: bool,
    visible: bool,
}

/// Semantic actions on one page.
///
/// Page objects hold a `PageHandle` and expose intent methods built from
/// these primitives. The handle is cheap to clone; it shares the
/// underlying page.
///
/// # Example
///
/// ```ignore
/// use webtestkit::browser::{Locator, PageHandle};
///
/// let page = PageHandle::new(&session, &config);
/// page.goto("https://example.com").await?;
/// page.fill(&Locator::css("#name"), "Ada").await?;
/// page.click(&Locator::css("#submit"), None).await?;
/// ```
#[derive(Clone)]
pub struct PageHandle {
    page: Page,
    default_timeout: Duration,
}

impl PageHandle {
    /// Creates a handle over the session's page with the configured
    /// default action timeout.
    pub fn new(session: &BrowserSession, config: &HarnessConfig) -> Self {
        PageHandle {
            page: session.page().clone(),
            default_timeout: config.action_timeout(),
        }
    }

    /// The default per-action deadline.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    // Navigation

    /// Navigates to the given URL and waits for the load to settle.
    ///
    /// Fails with `Navigation` on SSL errors, invalid URLs and unreachable
    /// hosts. A non-2xx HTTP status does NOT fail; read the status from
    /// the response explicitly when it matters.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map(drop)
            .map_err(|err| match err {
                CdpError::Timeout => Error::Timeout {
                    what: format!("navigation to '{url}'"),
                    timeout_ms: self.default_timeout.as_millis() as u64,
                },
                other => Error::Navigation {
                    url: url.to_owned(),
                    message: other.to_string(),
                },
            })
    }

    /// Navigates to the configured base URL.
    pub async fn goto_base(&self, config: &HarnessConfig) -> Result<()> {
        self.goto(config.require_base_url()?.as_str()).await
    }

    /// Reloads the current page.
    pub async fn reload(&self) -> Result<()> {
        let url = self.url().await.unwrap_or_default();
        self.page
            .reload()
            .await
            .map(drop)
            .map_err(|err| Error::Navigation {
                url,
                message: err.to_string(),
            })
    }

    /// URL of the current page.
    pub async fn url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    // Actions

    /// Clicks the element.
    ///
    /// Unmodified left clicks go through the engine's input path; other
    /// buttons and modifier combinations are dispatched as DOM mouse
    /// events on the element.
    pub async fn click(&self, locator: &Locator, options: Option<ClickOptions>) -> Result<()> {
        let options = options.unwrap_or_default();
        let element = self
            .resolve(locator, self.timeout_for(options.timeout_ms))
            .await?;
        element.scroll_into_view().await?;
        if let Some(delay_ms) = options.delay_ms {
            sleep(Duration::from_millis(delay_ms)).await;
        }

        match options.button {
            MouseButton::Left if options.modifiers.is_empty() => {
                element.click().await?;
            }
            MouseButton::Left => {
                self.dispatch_mouse_js(locator, "click", 0, &options.modifiers)
                    .await?;
            }
            MouseButton::Right => {
                self.dispatch_mouse_js(locator, "contextmenu", 2, &options.modifiers)
                    .await?;
            }
            MouseButton::Middle => {
                self.dispatch_mouse_js(locator, "auxclick", 1, &options.modifiers)
                    .await?;
            }
        }
        Ok(())
    }

    /// Double-clicks the element: two engine clicks followed by a
    /// `dblclick` DOM event so handlers for either fire.
    pub async fn dblclick(&self, locator: &Locator, options: Option<ClickOptions>) -> Result<()> {
        let options = options.unwrap_or_default();
        let element = self
            .resolve(locator, self.timeout_for(options.timeout_ms))
            .await?;
        element.scroll_into_view().await?;
        element.click().await?;
        if let Some(delay_ms) = options.delay_ms {
            sleep(Duration::from_millis(delay_ms)).await;
        }
        element.click().await?;
        self.dispatch_mouse_js(locator, "dblclick", 0, &options.modifiers)
            .await
    }

    /// Ensures a checkbox or radio element is checked. Idempotent.
    pub async fn check(&self, locator: &Locator) -> Result<()> {
        self.set_checked(locator, true).await
    }

    /// Ensures a checkbox element is unchecked. Idempotent.
    pub async fn uncheck(&self, locator: &Locator) -> Result<()> {
        self.set_checked(locator, false).await
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> Result<()> {
        let element = self.resolve(locator, self.default_timeout).await?;
        if self.is_checked(locator).await? != checked {
            element.scroll_into_view().await?;
            element.click().await?;
        }
        if self.is_checked(locator).await? != checked {
            return Err(Error::Cdp(format!(
                "could not set checked={checked} on '{}'",
                locator.describe()
            )));
        }
        Ok(())
    }

    /// Drags the source element onto the target element.
    ///
    /// Dispatched as an HTML5 drag event sequence (dragstart, dragover,
    /// drop, dragend) with a shared DataTransfer.
    pub async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()> {
        // Resolve both ends first so the wait semantics match other actions.
        self.resolve(source, self.default_timeout).await?;
        self.resolve(target, self.default_timeout).await?;

        let js = drag_and_drop_js(source, target);
        let probe: Probe = self.eval(&js).await?;
        if !probe.found {
            return Err(Error::Cdp(format!(
                "drag and drop lost '{}' or '{}' during dispatch",
                source.describe(),
                target.describe()
            )));
        }
        Ok(())
    }

    /// Clears the value of an input, textarea or contenteditable element.
    pub async fn clear(&self, locator: &Locator) -> Result<()> {
        self.fill(locator, "").await
    }

    /// Sets the element's value and fires `input` and `change` events.
    ///
    /// Pass an empty string to clear the field. Use `type_text` for
    /// fine-grained keystrokes.
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        self.resolve(locator, self.default_timeout).await?;
        let js = fill_js(locator, text);
        let probe: Probe = self.eval(&js).await?;
        if !probe.found {
            return Err(Error::Cdp(format!(
                "element '{}' detached before fill",
                locator.describe()
            )));
        }
        Ok(())
    }

    /// Focuses the element and types the text through the keyboard, one
    /// key at a time, honoring the configured inter-key delay.
    pub async fn type_text(
        &self,
        locator: &Locator,
        text: &str,
        options: Option<TypeOptions>,
    ) -> Result<()> {
        let options = options.unwrap_or_default();
        let element = self
            .resolve(locator, self.timeout_for(options.timeout_ms))
            .await?;
        element.focus().await?;

        match options.delay_ms {
            None | Some(0) => {
                element.type_str(text).await?;
            }
            Some(delay_ms) => {
                let mut buffer = [0u8; 4];
                for ch in text.chars() {
                    element.type_str(ch.encode_utf8(&mut buffer)).await?;
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
        Ok(())
    }

    /// Focuses the element and presses a named key (`Enter`, `Tab`,
    /// `ArrowDown`, `a`, ...). The delay, when set, is applied after the
    /// press.
    pub async fn press_key(
        &self,
        locator: &Locator,
        key: &str,
        options: Option<PressOptions>,
    ) -> Result<()> {
        let options = options.unwrap_or_default();
        let element = self
            .resolve(locator, self.timeout_for(options.timeout_ms))
            .await?;
        element.focus().await?;
        element.press_key(key).await?;
        if let Some(delay_ms) = options.delay_ms {
            sleep(Duration::from_millis(delay_ms)).await;
        }
        Ok(())
    }

    /// Calls focus on the matching element.
    pub async fn focus(&self, locator: &Locator) -> Result<()> {
        let element = self.resolve(locator, self.default_timeout).await?;
        element.focus().await?;
        Ok(())
    }

    /// Moves the pointer over the element (mouseover/mouseenter/mousemove).
    pub async fn hover(&self, locator: &Locator) -> Result<()> {
        let element = self.resolve(locator, self.default_timeout).await?;
        element.scroll_into_view().await?;
        for event in ["mouseover", "mouseenter", "mousemove"] {
            self.dispatch_mouse_js(locator, event, 0, &[]).await?;
        }
        Ok(())
    }

    /// Scrolls the element into view unless it is already fully visible.
    pub async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        let element = self.resolve(locator, self.default_timeout).await?;
        element.scroll_into_view().await?;
        Ok(())
    }

    /// Selects options in a `<select>` by value or label.
    ///
    /// Returns the values actually selected; fires `input` and `change`
    /// once after all options are applied.
    pub async fn select_option(&self, locator: &Locator, values: &[&str]) -> Result<Vec<String>> {
        self.resolve(locator, self.default_timeout).await?;
        let js = select_option_js(locator, values);
        let probe: Probe = self.eval(&js).await?;
        if !probe.found {
            return Err(Error::Cdp(format!(
                "element '{}' is not a <select>",
                locator.describe()
            )));
        }
        let selected = probe
            .value
            .map(|value| serde_json::from_value(value))
            .transpose()?
            .unwrap_or_default();
        Ok(selected)
    }

    // Queries

    /// Value of the given attribute, when present.
    pub async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let element = self.resolve(locator, self.default_timeout).await?;
        Ok(element.attribute(name).await?)
    }

    /// The element's rendered text (element.innerText).
    pub async fn inner_text(&self, locator: &Locator) -> Result<String> {
        let element = self.resolve(locator, self.default_timeout).await?;
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    /// The node's text content (node.textContent), `None` when unset.
    pub async fn text_content(&self, locator: &Locator) -> Result<Option<String>> {
        self.resolve(locator, self.default_timeout).await?;
        let probe: Probe = self.eval(&value_js(locator, "el.textContent")).await?;
        Ok(probe
            .value
            .and_then(|value| value.as_str().map(str::to_owned)))
    }

    /// `input.value` of an input, textarea or select element.
    pub async fn input_value(&self, locator: &Locator) -> Result<String> {
        self.resolve(locator, self.default_timeout).await?;
        let probe: Probe = self.eval(&value_js(locator, "el.value ?? ''")).await?;
        Ok(probe
            .value
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default())
    }

    /// The element's inner HTML.
    pub async fn inner_html(&self, locator: &Locator) -> Result<String> {
        self.resolve(locator, self.default_timeout).await?;
        let probe: Probe = self.eval(&value_js(locator, "el.innerHTML")).await?;
        Ok(probe
            .value
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default())
    }

    /// Whether the element is attached and visible. Returns immediately;
    /// a missing element is simply not visible.
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        let state: StateProbe = self.eval(&state_js(locator)).await?;
        Ok(state.attached && state.visible)
    }

    /// The opposite of `is_visible`; also true for detached elements.
    pub async fn is_hidden(&self, locator: &Locator) -> Result<bool> {
        Ok(!self.is_visible(locator).await?)
    }

    /// Whether the element is enabled.
    pub async fn is_enabled(&self, locator: &Locator) -> Result<bool> {
        self.resolve(locator, self.default_timeout).await?;
        self.bool_probe(locator, "!el.disabled").await
    }

    /// Whether the element is disabled.
    pub async fn is_disabled(&self, locator: &Locator) -> Result<bool> {
        Ok(!self.is_enabled(locator).await?)
    }

    /// Whether the checkbox or radio element is checked.
    pub async fn is_checked(&self, locator: &Locator) -> Result<bool> {
        self.resolve(locator, self.default_timeout).await?;
        self.bool_probe(locator, "el.checked === true").await
    }

    /// Whether the element is enabled and not read-only (or
    /// contenteditable).
    pub async fn is_editable(&self, locator: &Locator) -> Result<bool> {
        self.resolve(locator, self.default_timeout).await?;
        self.bool_probe(
            locator,
            "(!el.disabled && !el.readOnly) || el.isContentEditable === true",
        )
        .await
    }

    // Waiting

    /// Waits until the element satisfies the requested state.
    ///
    /// Returns immediately when the state already holds; otherwise polls
    /// until the deadline and fails with `Timeout`.
    pub async fn wait_for_state(&self, locator: &Locator, options: WaitOptions) -> Result<()> {
        let timeout = self.timeout_for(options.timeout_ms);
        let deadline = Instant::now() + timeout;
        let js = state_js(locator);

        loop {
            let state: StateProbe = self.eval(&js).await?;
            let satisfied = match options.state {
                ElementState::Attached => state.attached,
                ElementState::Detached => !state.attached,
                ElementState::Visible => state.attached && state.visible,
                ElementState::Hidden => !state.attached || !state.visible,
            };
            if satisfied {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    what: format!(
                        "waiting for '{}' to be {:?}",
                        locator.describe(),
                        options.state
                    ),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    // Internals

    fn timeout_for(&self, override_ms: Option<u64>) -> Duration {
        override_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_timeout)
    }

    /// Resolves the locator to a live element, polling until the deadline.
    async fn resolve(&self, locator: &Locator, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;

        loop {
            let found = match locator.index() {
                None => self.page.find_element(locator.selector()).await.ok(),
                Some(index) => match self.page.find_elements(locator.selector()).await {
                    Ok(elements) if !elements.is_empty() => {
                        let len = elements.len() as i64;
                        let i = if index < 0 { len + index } else { index };
                        if (0..len).contains(&i) {
                            elements.into_iter().nth(i as usize)
                        } else {
                            None
                        }
                    }
                    _ => None,
                },
            };

            if let Some(element) = found {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    what: format!("waiting for element '{}'", locator.describe()),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, js: &str) -> Result<T> {
        let result = self.page.evaluate(js).await?;
        result
            .into_value::<T>()
            .map_err(|err| Error::Cdp(err.to_string()))
    }

    async fn bool_probe(&self, locator: &Locator, expr: &str) -> Result<bool> {
        let probe: Probe = self.eval(&value_js(locator, expr)).await?;
        Ok(probe
            .value
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    /// Dispatches a bubbling MouseEvent of the given type on the element.
    async fn dispatch_mouse_js(
        &self,
        locator: &Locator,
        event: &str,
        button: u8,
        modifiers: &[KeyboardModifier],
    ) -> Result<()> {
        let js = mouse_event_js(locator, event, button, modifiers);
        let probe: Probe = self.eval(&js).await?;
        if !probe.found {
            return Err(Error::Cdp(format!(
                "element '{}' detached before {event}",
                locator.describe()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHandle")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

// JS snippet builders. Selector text always goes through Locator's
// JSON-escaping; free-form text is escaped the same way here.

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_owned())
}

fn value_js(locator: &Locator, expr: &str) -> String {
    format!(
        "(() => {{ const el = {element}; if (!el) return {{ found: false }}; \
         return {{ found: true, value: {expr} }}; }})()",
        element = locator.js_element(),
    )
}

fn state_js(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = {element}; \
         if (!el) return {{ attached: false, visible: false }}; \
         const style = window.getComputedStyle(el); \
         const rect = el.getBoundingClientRect(); \
         const visible = rect.width > 0 && rect.height > 0 \
             && style.visibility !== 'hidden' && style.display !== 'none'; \
         return {{ attached: true, visible }}; }})()",
        element = locator.js_element(),
    )
}

fn fill_js(locator: &Locator, text: &str) -> String {
    format!(
        "(() => {{ const el = {element}; if (!el) return {{ found: false }}; \
         el.focus(); \
         if (el.isContentEditable) {{ el.textContent = {text}; }} else {{ el.value = {text}; }} \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return {{ found: true }}; }})()",
        element = locator.js_element(),
        text = js_string(text),
    )
}

fn select_option_js(locator: &Locator, values: &[&str]) -> String {
    let wanted = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_owned());
    format!(
        "(() => {{ const el = {element}; \
         if (!el || el.tagName !== 'SELECT') return {{ found: false }}; \
         const wanted = {wanted}; \
         const selected = []; \
         for (const option of el.options) {{ \
             const hit = wanted.includes(option.value) || wanted.includes(option.label); \
             option.selected = hit && (el.multiple || selected.length === 0); \
             if (option.selected) selected.push(option.value); \
         }} \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return {{ found: true, value: selected }}; }})()",
        element = locator.js_element(),
    )
}

fn mouse_event_js(
    locator: &Locator,
    event: &str,
    button: u8,
    modifiers: &[KeyboardModifier],
) -> String {
    let modifier_props: String = modifiers
        .iter()
        .map(|modifier| format!(", {}: true", modifier.event_property()))
        .collect();
    format!(
        "(() => {{ const el = {element}; if (!el) return {{ found: false }}; \
         el.dispatchEvent(new MouseEvent({event}, \
             {{ bubbles: true, cancelable: true, view: window, button: {button}{modifier_props} }})); \
         return {{ found: true }}; }})()",
        element = locator.js_element(),
        event = js_string(event),
    )
}

fn drag_and_drop_js(source: &Locator, target: &Locator) -> String {
    format!(
        "(() => {{ const src = {source}; const dst = {target}; \
         if (!src || !dst) return {{ found: false }}; \
         const data = new DataTransfer(); \
         src.dispatchEvent(new DragEvent('dragstart', {{ bubbles: true, dataTransfer: data }})); \
         dst.dispatchEvent(new DragEvent('dragover', {{ bubbles: true, cancelable: true, dataTransfer: data }})); \
         dst.dispatchEvent(new DragEvent('drop', {{ bubbles: true, dataTransfer: data }})); \
         src.dispatchEvent(new DragEvent('dragend', {{ bubbles: true, dataTransfer: data }})); \
         return {{ found: true }}; }})()",
        source = source.js_element(),
        target = target.js_element(),
    )
}
