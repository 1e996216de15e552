//! In-memory windowing backend
//!
//! `HeadlessBackend` keeps windows, content islands and site attachments in
//! generational handle maps and behaves like a desktop platform in the ways
//! the modal lifecycle cares about:
//!
//! - popup sites get their own hidden window, owned by the parent's window
//! - showing a `MODAL` popup disables its owner; hiding it does not re-enable
//!   the owner, so whoever made the popup has to do that
//! - closing a popup attachment destroys its window and drops foreground if
//!   the popup had it
//! - pointer presses on disabled or hidden windows are swallowed
//! - the close button of a popup destroys it directly unless close
//!   interception is on, in which case a [`NativeEvent::CloseRequested`] is
//!   queued instead
//!
//! Every trait call is journaled as a [`BackendCall`] so tests can assert
//! ordering, and [`FaultPlan`] makes selected calls fail.

use std::collections::VecDeque;

use super::backend::{BackendError, BackendResult, WindowingBackend};
use super::types::{
    AttachmentId, CommandId, ContentId, NativeEvent, PopupSite, PresenterFlags, SurfaceContent,
    WindowId,
};
use crate::foundation::collections::{key_to_raw, raw_to_key, HandleMap};
use crate::foundation::math::{Extent, Point, Rect};

slotmap::new_key_type! {
    struct WindowKey;
    struct AttachmentKey;
    struct ContentKey;
}

/// Where new top-level windows are placed
const DEFAULT_WINDOW_ORIGIN: (i32, i32) = (100, 100);

/// Selected backend calls that should fail
///
/// Flags stay set until cleared, so a test can fail every attempt of an
/// operation across several lifecycle cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Report the whole subsystem as unavailable
    pub unavailable: bool,
    /// Fail `create_popup_site`
    pub fail_popup_site: bool,
    /// Fail `configure_presenter`
    pub fail_presenter: bool,
    /// Fail `close_attachment` (the attachment and its window leak)
    pub fail_close_attachment: bool,
    /// Fail `set_foreground`
    pub fail_set_foreground: bool,
}

/// Journal entry for one backend call, recorded before it executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// `create_window`
    CreateWindow,
    /// `destroy_window`
    DestroyWindow(WindowId),
    /// `create_content`
    CreateContent,
    /// `close_content`
    CloseContent(ContentId),
    /// `create_child_site`
    CreateChildSite(WindowId, ContentId),
    /// `create_popup_site`
    CreatePopupSite(AttachmentId, ContentId),
    /// `close_attachment`
    CloseAttachment(AttachmentId),
    /// `show_attachment`
    ShowAttachment(AttachmentId),
    /// `hide_attachment`
    HideAttachment(AttachmentId),
    /// `configure_presenter`
    ConfigurePresenter(WindowId, PresenterFlags),
    /// `set_title`
    SetTitle(WindowId, String),
    /// `resize_client`
    ResizeClient(WindowId, Extent),
    /// `move_window`
    MoveWindow(WindowId, Point),
    /// `set_close_interception`
    SetCloseInterception(WindowId, bool),
    /// `set_input_enabled`
    SetInputEnabled(WindowId, bool),
    /// `set_foreground`
    SetForeground(WindowId),
}

#[derive(Debug)]
struct NativeWindow {
    title: String,
    rect: Rect,
    visible: bool,
    input_enabled: bool,
    presenter: PresenterFlags,
    owner: Option<WindowId>,
    intercept_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteKind {
    Child,
    Popup,
}

#[derive(Debug)]
struct NativeAttachment {
    kind: SiteKind,
    window: WindowId,
    content: ContentId,
    visible: bool,
}

#[derive(Debug)]
struct NativeContent {
    size: Extent,
}

/// In-memory platform for tests and scripted sessions
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    windows: HandleMap<WindowKey, NativeWindow>,
    attachments: HandleMap<AttachmentKey, NativeAttachment>,
    contents: HandleMap<ContentKey, NativeContent>,
    foreground: Option<WindowId>,
    events: VecDeque<NativeEvent>,
    calls: Vec<BackendCall>,
    faults: FaultPlan,
    blocked_inputs: usize,
}

impl HeadlessBackend {
    /// Create an available backend with no windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with a fault plan already in place
    pub fn with_faults(faults: FaultPlan) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }

    /// Mutable access to the fault plan
    pub fn faults_mut(&mut self) -> &mut FaultPlan {
        &mut self.faults
    }

    // --- Simulated user input -------------------------------------------

    /// Press one of the host's buttons
    ///
    /// Buttons are children of `host`, so the press is swallowed while the
    /// host is disabled. Returns whether the press was delivered.
    pub fn press_button(&mut self, host: WindowId, command: CommandId) -> bool {
        if !self.accepts_input(host) {
            log::debug!("Button {:?} press on {} blocked", command, host);
            self.blocked_inputs += 1;
            return false;
        }
        self.events.push_back(NativeEvent::Command(command));
        true
    }

    /// Press the primary pointer button inside a window's client area
    ///
    /// Returns whether the press was delivered.
    pub fn click(&mut self, window: WindowId, position: Point) -> bool {
        if !self.accepts_input(window) {
            log::debug!("Pointer press on {} at ({}, {}) blocked", window, position.x, position.y);
            self.blocked_inputs += 1;
            return false;
        }
        self.events.push_back(NativeEvent::PointerPressed { window, position });
        true
    }

    /// Press the title bar close button of a window
    ///
    /// Top-level windows always get a `CloseRequested` event. Popups only
    /// have a close button with a title bar; without close interception the
    /// platform destroys them on the spot. Returns whether anything happened.
    pub fn click_close_button(&mut self, window: WindowId) -> bool {
        let Some((reachable, top_level, intercept, titled)) = self.window(window).map(|w| {
            (
                w.visible && w.input_enabled,
                w.owner.is_none(),
                w.intercept_close,
                w.presenter.contains(PresenterFlags::TITLE_BAR),
            )
        }) else {
            return false;
        };
        if !reachable {
            self.blocked_inputs += 1;
            return false;
        }

        if top_level || intercept {
            self.events.push_back(NativeEvent::CloseRequested(window));
            return true;
        }
        if !titled {
            return false;
        }

        log::debug!("Platform default close destroying {}", window);
        self.remove_window(window);
        true
    }

    /// Ask a top-level window to close from outside its client area
    ///
    /// Taskbar close and session end reach a window even while it is
    /// disabled. Returns false for unknown windows and popups.
    pub fn request_window_close(&mut self, window: WindowId) -> bool {
        match self.window(window) {
            Some(native) if native.owner.is_none() => {
                self.events.push_back(NativeEvent::CloseRequested(window));
                true
            }
            _ => false,
        }
    }

    // --- Inspection -----------------------------------------------------

    /// Journal of backend calls so far
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget journaled calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Window holding foreground focus
    pub fn foreground(&self) -> Option<WindowId> {
        self.foreground
    }

    /// Whether a window is live and visible
    pub fn is_visible(&self, window: WindowId) -> bool {
        self.window(window).is_some_and(|w| w.visible)
    }

    /// Whether a window is live and accepts input
    pub fn is_input_enabled(&self, window: WindowId) -> bool {
        self.window(window).is_some_and(|w| w.input_enabled)
    }

    /// Title of a live window
    pub fn title(&self, window: WindowId) -> Option<&str> {
        self.window(window).map(|w| w.title.as_str())
    }

    /// Presenter flags of a live window
    pub fn presenter(&self, window: WindowId) -> Option<PresenterFlags> {
        self.window(window).map(|w| w.presenter)
    }

    /// Whether close interception is on for a live window
    pub fn intercepts_close(&self, window: WindowId) -> bool {
        self.window(window).is_some_and(|w| w.intercept_close)
    }

    /// Owner of a live window
    pub fn owner(&self, window: WindowId) -> Option<WindowId> {
        self.window(window).and_then(|w| w.owner)
    }

    /// Live windows
    pub fn live_window_count(&self) -> usize {
        self.windows.len()
    }

    /// Live popup attachments
    pub fn live_popup_count(&self) -> usize {
        self.attachments.values().filter(|a| a.kind == SiteKind::Popup).count()
    }

    /// Live attachments of any kind
    pub fn live_attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Live content islands
    pub fn live_content_count(&self) -> usize {
        self.contents.len()
    }

    /// Input events swallowed because their target was disabled or hidden
    pub fn blocked_input_count(&self) -> usize {
        self.blocked_inputs
    }

    /// Content island connected to a live attachment
    pub fn attachment_content(&self, attachment: AttachmentId) -> Option<ContentId> {
        self.attachments
            .get(raw_to_key::<AttachmentKey>(attachment.0))
            .map(|a| a.content)
    }

    /// Whether an attachment is live and visible
    pub fn is_attachment_visible(&self, attachment: AttachmentId) -> bool {
        self.attachments
            .get(raw_to_key::<AttachmentKey>(attachment.0))
            .is_some_and(|a| a.visible)
    }

    // --- Internals ------------------------------------------------------

    fn record(&mut self, call: BackendCall) {
        self.calls.push(call);
    }

    fn check_available(&self) -> BackendResult<()> {
        if self.faults.unavailable {
            Err(BackendError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn accepts_input(&self, window: WindowId) -> bool {
        self.window(window).is_some_and(|w| w.visible && w.input_enabled)
    }

    fn window(&self, window: WindowId) -> Option<&NativeWindow> {
        self.windows.get(raw_to_key::<WindowKey>(window.0))
    }

    fn window_mut(&mut self, window: WindowId) -> BackendResult<&mut NativeWindow> {
        self.windows
            .get_mut(raw_to_key::<WindowKey>(window.0))
            .ok_or(BackendError::UnknownWindow(window))
    }

    fn attachment_mut(&mut self, attachment: AttachmentId) -> BackendResult<&mut NativeAttachment> {
        self.attachments
            .get_mut(raw_to_key::<AttachmentKey>(attachment.0))
            .ok_or(BackendError::UnknownAttachment(attachment))
    }

    fn set_window_visible(&mut self, window: WindowId, visible: bool) -> BackendResult<()> {
        let native = self.window_mut(window)?;
        if native.visible == visible {
            return Ok(());
        }
        native.visible = visible;
        let presenter = native.presenter;
        let owner = native.owner;

        // Native modal block: the owner goes disabled while a modal popup is up
        if visible && presenter.contains(PresenterFlags::MODAL) {
            if let Some(owner) = owner {
                if let Ok(owner_window) = self.window_mut(owner) {
                    owner_window.input_enabled = false;
                }
            }
        }

        self.events.push_back(NativeEvent::VisibilityChanged { window, visible });
        Ok(())
    }

    /// Destroy a window, its owned windows and any attachments living in them
    fn remove_window(&mut self, window: WindowId) {
        let Some(native) = self.windows.remove(raw_to_key::<WindowKey>(window.0)) else {
            return;
        };

        if native.visible {
            self.events.push_back(NativeEvent::VisibilityChanged { window, visible: false });
        }
        if self.foreground == Some(window) {
            self.foreground = None;
        }
        self.attachments.retain(|_, attachment| attachment.window != window);
        self.events.push_back(NativeEvent::WindowDestroyed(window));

        let owned: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|(_, w)| w.owner == Some(window))
            .map(|(key, _)| WindowId(key_to_raw(key)))
            .collect();
        for child in owned {
            self.remove_window(child);
        }
    }

    fn insert_window(&mut self, native: NativeWindow) -> WindowId {
        WindowId(key_to_raw(self.windows.insert(native)))
    }
}

impl WindowingBackend for HeadlessBackend {
    fn is_available(&self) -> bool {
        !self.faults.unavailable
    }

    fn create_window(&mut self, title: &str, size: Extent) -> BackendResult<WindowId> {
        self.record(BackendCall::CreateWindow);
        self.check_available()?;

        let (x, y) = DEFAULT_WINDOW_ORIGIN;
        let window = self.insert_window(NativeWindow {
            title: title.to_string(),
            rect: Rect::from_parts(Point::new(x, y), size),
            visible: true,
            input_enabled: true,
            presenter: PresenterFlags::BORDER | PresenterFlags::TITLE_BAR,
            owner: None,
            intercept_close: false,
        });
        self.foreground = Some(window);
        Ok(window)
    }

    fn destroy_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.record(BackendCall::DestroyWindow(window));
        if self.window(window).is_none() {
            return Err(BackendError::UnknownWindow(window));
        }
        self.remove_window(window);
        Ok(())
    }

    fn window_exists(&self, window: WindowId) -> bool {
        self.window(window).is_some()
    }

    fn create_content(&mut self, content: &SurfaceContent) -> BackendResult<ContentId> {
        self.record(BackendCall::CreateContent);
        self.check_available()?;
        let key = self.contents.insert(NativeContent { size: content.size });
        Ok(ContentId(key_to_raw(key)))
    }

    fn close_content(&mut self, content: ContentId) -> BackendResult<()> {
        self.record(BackendCall::CloseContent(content));
        self.contents
            .remove(raw_to_key::<ContentKey>(content.0))
            .map(|_| ())
            .ok_or(BackendError::UnknownContent(content))
    }

    fn create_child_site(&mut self, window: WindowId, content: ContentId) -> BackendResult<AttachmentId> {
        self.record(BackendCall::CreateChildSite(window, content));
        self.check_available()?;
        if self.window(window).is_none() {
            return Err(BackendError::UnknownWindow(window));
        }
        if !self.contents.contains_key(raw_to_key::<ContentKey>(content.0)) {
            return Err(BackendError::UnknownContent(content));
        }

        let key = self.attachments.insert(NativeAttachment {
            kind: SiteKind::Child,
            window,
            content,
            visible: true,
        });
        Ok(AttachmentId(key_to_raw(key)))
    }

    fn create_popup_site(&mut self, parent: AttachmentId, content: ContentId) -> BackendResult<PopupSite> {
        self.record(BackendCall::CreatePopupSite(parent, content));
        self.check_available()?;
        if self.faults.fail_popup_site {
            return Err(BackendError::NativeCallFailed {
                operation: "create_popup_site",
                reason: "injected fault".to_string(),
            });
        }

        let owner = self.attachment_mut(parent)?.window;
        let size = self
            .contents
            .get(raw_to_key::<ContentKey>(content.0))
            .map(|c| c.size)
            .ok_or(BackendError::UnknownContent(content))?;

        let window = self.insert_window(NativeWindow {
            title: String::new(),
            rect: Rect::from_parts(Point::new(0, 0), size),
            visible: false,
            input_enabled: true,
            presenter: PresenterFlags::empty(),
            owner: Some(owner),
            intercept_close: false,
        });
        let key = self.attachments.insert(NativeAttachment {
            kind: SiteKind::Popup,
            window,
            content,
            visible: false,
        });

        Ok(PopupSite {
            attachment: AttachmentId(key_to_raw(key)),
            window,
        })
    }

    fn close_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()> {
        self.record(BackendCall::CloseAttachment(attachment));
        if self.faults.fail_close_attachment {
            return Err(BackendError::NativeCallFailed {
                operation: "close_attachment",
                reason: "injected fault".to_string(),
            });
        }

        let native = self
            .attachments
            .remove(raw_to_key::<AttachmentKey>(attachment.0))
            .ok_or(BackendError::UnknownAttachment(attachment))?;
        if native.kind == SiteKind::Popup {
            self.remove_window(native.window);
        }
        Ok(())
    }

    fn show_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()> {
        self.record(BackendCall::ShowAttachment(attachment));
        let native = self.attachment_mut(attachment)?;
        native.visible = true;
        let (kind, window) = (native.kind, native.window);
        if kind == SiteKind::Popup {
            self.set_window_visible(window, true)?;
        }
        Ok(())
    }

    fn hide_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()> {
        self.record(BackendCall::HideAttachment(attachment));
        let native = self.attachment_mut(attachment)?;
        native.visible = false;
        let (kind, window) = (native.kind, native.window);
        if kind == SiteKind::Popup {
            self.set_window_visible(window, false)?;
            if self.foreground == Some(window) {
                self.foreground = None;
            }
        }
        Ok(())
    }

    fn configure_presenter(&mut self, window: WindowId, flags: PresenterFlags) -> BackendResult<()> {
        self.record(BackendCall::ConfigurePresenter(window, flags));
        if self.faults.fail_presenter {
            return Err(BackendError::NativeCallFailed {
                operation: "configure_presenter",
                reason: "injected fault".to_string(),
            });
        }
        self.window_mut(window)?.presenter = flags;
        Ok(())
    }

    fn set_title(&mut self, window: WindowId, title: &str) -> BackendResult<()> {
        self.record(BackendCall::SetTitle(window, title.to_string()));
        self.window_mut(window)?.title = title.to_string();
        Ok(())
    }

    fn resize_client(&mut self, window: WindowId, size: Extent) -> BackendResult<()> {
        self.record(BackendCall::ResizeClient(window, size));
        self.window_mut(window)?.rect.size = size;
        Ok(())
    }

    fn move_window(&mut self, window: WindowId, position: Point) -> BackendResult<()> {
        self.record(BackendCall::MoveWindow(window, position));
        self.window_mut(window)?.rect.origin = position;
        Ok(())
    }

    fn window_rect(&self, window: WindowId) -> BackendResult<Rect> {
        self.window(window)
            .map(|w| w.rect)
            .ok_or(BackendError::UnknownWindow(window))
    }

    fn set_close_interception(&mut self, window: WindowId, intercept: bool) -> BackendResult<()> {
        self.record(BackendCall::SetCloseInterception(window, intercept));
        self.window_mut(window)?.intercept_close = intercept;
        Ok(())
    }

    fn set_input_enabled(&mut self, window: WindowId, enabled: bool) -> BackendResult<()> {
        self.record(BackendCall::SetInputEnabled(window, enabled));
        self.window_mut(window)?.input_enabled = enabled;
        Ok(())
    }

    fn set_foreground(&mut self, window: WindowId) -> BackendResult<()> {
        self.record(BackendCall::SetForeground(window));
        if self.faults.fail_set_foreground {
            return Err(BackendError::NativeCallFailed {
                operation: "set_foreground",
                reason: "injected fault".to_string(),
            });
        }
        if self.window(window).is_none() {
            return Err(BackendError::UnknownWindow(window));
        }
        self.foreground = Some(window);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<NativeEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_site(backend: &mut HeadlessBackend) -> (WindowId, AttachmentId) {
        let window = backend.create_window("host", Extent::new(600, 400)).unwrap();
        let content = backend.create_content(&SurfaceContent::new(Extent::new(800, 600))).unwrap();
        let site = backend.create_child_site(window, content).unwrap();
        (window, site)
    }

    fn popup(backend: &mut HeadlessBackend, parent: AttachmentId) -> PopupSite {
        let content = backend.create_content(&SurfaceContent::new(Extent::new(400, 300))).unwrap();
        backend.create_popup_site(parent, content).unwrap()
    }

    #[test]
    fn test_popup_window_is_hidden_and_owned() {
        let mut backend = HeadlessBackend::new();
        let (host, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);

        assert!(!backend.is_visible(popup.window));
        assert_eq!(backend.owner(popup.window), Some(host));
        assert_eq!(backend.live_popup_count(), 1);
    }

    #[test]
    fn test_modal_show_disables_owner_and_hide_does_not_restore() {
        let mut backend = HeadlessBackend::new();
        let (host, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);
        backend.configure_presenter(popup.window, PresenterFlags::MODAL).unwrap();

        backend.show_attachment(popup.attachment).unwrap();
        assert!(backend.is_visible(popup.window));
        assert!(!backend.is_input_enabled(host));

        backend.hide_attachment(popup.attachment).unwrap();
        assert!(!backend.is_input_enabled(host));
    }

    #[test]
    fn test_visibility_events_are_queued() {
        let mut backend = HeadlessBackend::new();
        let (_, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);

        backend.show_attachment(popup.attachment).unwrap();
        backend.hide_attachment(popup.attachment).unwrap();

        assert_eq!(
            backend.poll_events(),
            vec![
                NativeEvent::VisibilityChanged { window: popup.window, visible: true },
                NativeEvent::VisibilityChanged { window: popup.window, visible: false },
            ]
        );
        assert!(backend.poll_events().is_empty());
    }

    #[test]
    fn test_close_attachment_destroys_popup_window() {
        let mut backend = HeadlessBackend::new();
        let (_, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);
        backend.show_attachment(popup.attachment).unwrap();
        backend.set_foreground(popup.window).unwrap();

        backend.close_attachment(popup.attachment).unwrap();

        assert!(!backend.window_exists(popup.window));
        assert_eq!(backend.foreground(), None);
        assert_eq!(backend.live_popup_count(), 0);
        assert!(matches!(
            backend.close_attachment(popup.attachment),
            Err(BackendError::UnknownAttachment(_))
        ));
    }

    #[test]
    fn test_input_blocked_on_disabled_window() {
        let mut backend = HeadlessBackend::new();
        let (host, _) = host_with_site(&mut backend);

        backend.set_input_enabled(host, false).unwrap();
        assert!(!backend.click(host, Point::new(1, 1)));
        assert!(!backend.press_button(host, CommandId::ShowModal));
        assert_eq!(backend.blocked_input_count(), 2);

        backend.set_input_enabled(host, true).unwrap();
        assert!(backend.press_button(host, CommandId::ShowModal));
        assert_eq!(backend.poll_events(), vec![NativeEvent::Command(CommandId::ShowModal)]);
    }

    #[test]
    fn test_close_button_respects_interception() {
        let mut backend = HeadlessBackend::new();
        let (_, site) = host_with_site(&mut backend);

        let intercepted = popup(&mut backend, site);
        backend.configure_presenter(intercepted.window, PresenterFlags::TITLE_BAR).unwrap();
        backend.set_close_interception(intercepted.window, true).unwrap();
        backend.show_attachment(intercepted.attachment).unwrap();
        backend.poll_events();

        assert!(backend.click_close_button(intercepted.window));
        assert!(backend.window_exists(intercepted.window));
        assert_eq!(backend.poll_events(), vec![NativeEvent::CloseRequested(intercepted.window)]);

        let unguarded = popup(&mut backend, site);
        backend.configure_presenter(unguarded.window, PresenterFlags::TITLE_BAR).unwrap();
        backend.show_attachment(unguarded.attachment).unwrap();

        assert!(backend.click_close_button(unguarded.window));
        assert!(!backend.window_exists(unguarded.window));
    }

    #[test]
    fn test_external_close_reaches_disabled_host() {
        let mut backend = HeadlessBackend::new();
        let (host, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);
        backend.set_input_enabled(host, false).unwrap();

        assert!(!backend.click_close_button(host));
        assert!(backend.request_window_close(host));
        assert!(!backend.request_window_close(popup.window));
        assert_eq!(backend.poll_events(), vec![NativeEvent::CloseRequested(host)]);
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut backend = HeadlessBackend::new();
        let (_, site) = host_with_site(&mut backend);

        let first = popup(&mut backend, site);
        backend.close_attachment(first.attachment).unwrap();
        let second = popup(&mut backend, site);

        assert_ne!(first.attachment, second.attachment);
        assert_ne!(first.window, second.window);
    }

    #[test]
    fn test_unavailable_backend() {
        let mut backend = HeadlessBackend::with_faults(FaultPlan { unavailable: true, ..FaultPlan::default() });
        assert!(!backend.is_available());
        assert_eq!(
            backend.create_window("host", Extent::new(10, 10)),
            Err(BackendError::Unavailable)
        );
    }

    #[test]
    fn test_destroying_owner_destroys_popups() {
        let mut backend = HeadlessBackend::new();
        let (host, site) = host_with_site(&mut backend);
        let popup = popup(&mut backend, site);

        backend.destroy_window(host).unwrap();

        assert!(!backend.window_exists(popup.window));
        assert_eq!(backend.live_attachment_count(), 0);
        assert_eq!(backend.live_window_count(), 0);
    }
}
