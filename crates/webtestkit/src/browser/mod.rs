// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Browser layer - one CDP-driven browser per scenario
//
// Architecture:
// - BrowserKind is the closed set of launchable browsers, selected from a
//   scenario tag and matched exhaustively
// - BrowserFactory launches the engine and hands out a BrowserSession
// - BrowserSession owns the browser process, its event handler task and
//   one page; closing is idempotent
// - PageHandle exposes the semantic element actions page objects build on
// - Locator is a declarative selector, resolved at action time

pub mod action_options;
pub mod factory;
pub mod kind;
pub mod locator;
pub mod page;
pub mod session;

pub use action_options::{
    ClickOptions, ElementState, KeyboardModifier, MouseButton, PressOptions, TypeOptions,
    WaitOptions,
};
pub use factory::BrowserFactory;
pub use kind::BrowserKind;
pub use locator::Locator;
pub use page::PageHandle;
pub use session::BrowserSession;
