//! Bootstrap and facade behaviour of a fully wired context.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use commentary::events::{
    AdminVisibility, CommentFetched, CommentReply, ListFailed, ListFetch, ListReload, Mounted,
};
use commentary::{
    key, ApiClient, CaptchaPayload, Checker, CheckerPayload, CommentData, Context, ContextError,
    DataManager, EditorController, ElementRef, ListFetchParams, MemorySink, NotifyLevel,
    ServiceError, SidebarController, SidebarShowPayload, SidebarView, Translator,
};

// ---------------------------
// Stubs
// ---------------------------

#[derive(Default)]
struct StubApi {
    calls: RefCell<Vec<ListFetchParams>>,
    fail_with: RefCell<Option<ServiceError>>,
}

impl StubApi {
    fn page() -> Vec<CommentData> {
        vec![
            CommentData::new(1, "first").with_nick("ada"),
            CommentData::new(2, "second").with_reply_to(1),
        ]
    }
}

#[async_trait(?Send)]
impl ApiClient for StubApi {
    async fn fetch_comments(&self, params: &ListFetchParams) -> Result<Vec<CommentData>, ServiceError> {
        self.calls.borrow_mut().push(params.clone());
        tokio::task::yield_now().await;
        match self.fail_with.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(Self::page()),
        }
    }

    async fn add_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError> {
        Ok(comment.clone())
    }

    async fn update_comment(&self, comment: &CommentData) -> Result<CommentData, ServiceError> {
        Ok(comment.clone())
    }

    async fn delete_comment(&self, _id: u64) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported("delete_comment"))
    }
}

#[derive(Default)]
struct StubData {
    list: RefCell<Vec<CommentData>>,
    last: RefCell<Option<ListFetchParams>>,
}

impl DataManager for StubData {
    fn comments(&self) -> Vec<CommentData> {
        self.list.borrow().clone()
    }

    fn load(&self, params: &ListFetchParams, comments: Vec<CommentData>) {
        let mut list = self.list.borrow_mut();
        if params.is_first_page() {
            list.clear();
        }
        list.extend(comments);
        *self.last.borrow_mut() = Some(params.clone());
    }

    fn insert(&self, comment: CommentData) {
        self.list.borrow_mut().push(comment);
    }

    fn update(&self, comment: CommentData) {
        if let Some(c) = self.list.borrow_mut().iter_mut().find(|c| c.id == comment.id) {
            *c = comment;
        }
    }

    fn remove(&self, id: u64) {
        self.list.borrow_mut().retain(|c| c.id != id);
    }

    fn last_fetch(&self) -> Option<ListFetchParams> {
        self.last.borrow().clone()
    }
}

/// Records every call as a string.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<String>>,
}

impl Recorder {
    fn push(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SidebarController for Recorder {
    fn show(&self, payload: SidebarShowPayload) {
        self.push(format!("sidebar.show({:?})", payload.view));
    }

    fn hide(&self) {
        self.push("sidebar.hide");
    }
}

impl EditorController for Recorder {
    fn show_loading(&self) {
        self.push("editor.show_loading");
    }

    fn hide_loading(&self) {
        self.push("editor.hide_loading");
    }

    fn notify(&self, msg: &str, level: NotifyLevel) {
        self.push(format!("editor.notify({msg}, {level:?})"));
    }

    fn reset_state(&self) {
        self.push("editor.reset_state");
    }
}

impl Checker for Recorder {
    fn check_captcha(&self, payload: CaptchaPayload) {
        self.push(format!("checker.captcha({:?})", payload.img_data));
        if let Some(ok) = payload.checker.on_success {
            ok();
        }
    }

    fn check_admin(&self, payload: CheckerPayload) {
        self.push("checker.admin");
        if let Some(cancel) = payload.on_cancel {
            cancel();
        }
    }
}

struct Dictionary;

impl Translator for Dictionary {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = match key {
            "reply" => "Reply",
            "counter" => "{count} comments",
            other => other,
        };
        args.iter().fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
    }
}

// ---------------------------
// Helpers
// ---------------------------

struct Widget {
    ctx: Rc<Context>,
    api: Rc<StubApi>,
    data: Rc<StubData>,
    ui: Rc<Recorder>,
    sink: Rc<MemorySink>,
}

fn bootstrap() -> Widget {
    let sink = Rc::new(MemorySink::new());
    let ctx = Context::builder().error_sink(sink.clone()).build();

    let api = Rc::new(StubApi::default());
    let data = Rc::new(StubData::default());
    let ui = Rc::new(Recorder::default());

    let as_api: Rc<dyn ApiClient> = api.clone();
    let as_data: Rc<dyn DataManager> = data.clone();
    let as_sidebar: Rc<dyn SidebarController> = ui.clone();
    let as_editor: Rc<dyn EditorController> = ui.clone();
    let as_checker: Rc<dyn Checker> = ui.clone();
    let as_i18n: Rc<dyn Translator> = Rc::new(Dictionary);
    ctx.inject(key::Api, as_api).unwrap();
    ctx.inject(key::Data, as_data).unwrap();
    ctx.inject(key::Sidebar, as_sidebar).unwrap();
    ctx.inject(key::Editor, as_editor).unwrap();
    ctx.inject(key::Checker, as_checker).unwrap();
    ctx.inject(key::I18n, as_i18n).unwrap();

    ctx.mount(ElementRef::new("#comments")).unwrap();
    Widget { ctx, api, data, ui, sink }
}

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T)) {
    let store = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&store);
    (store, move |v: &T| s.borrow_mut().push(v.clone()))
}

// ---------------------------
// Tests
// ---------------------------

#[tokio::test]
async fn test_fetch_calls_api_and_announces_result_once() {
    let sink = Rc::new(MemorySink::new());
    let ctx = Context::builder().error_sink(sink.clone()).build();
    let api = Rc::new(StubApi::default());
    let as_api: Rc<dyn ApiClient> = api.clone();
    ctx.inject(key::Api, as_api).unwrap();

    let (fetched, on_fetched) = recorder::<Vec<CommentData>>();
    ctx.on(CommentFetched, on_fetched).unwrap();
    ctx.mount(ElementRef::new("#comments")).unwrap();

    ctx.fetch(ListFetchParams::at(0)).await.unwrap();

    let calls = api.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].offset, 0);
    assert_eq!(*fetched.borrow(), vec![StubApi::page()]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_fetch_fills_limit_and_loads_data() {
    let w = bootstrap();
    w.ctx.update_conf(commentary::ConfPatch::page_size(5)).unwrap();
    let (started, on_fetch) = recorder::<ListFetchParams>();
    w.ctx.on(ListFetch, on_fetch).unwrap();

    w.ctx.fetch(ListFetchParams::at(0)).await.unwrap();
    w.ctx
        .fetch(ListFetchParams { limit: Some(50), ..ListFetchParams::at(2) })
        .await
        .unwrap();

    let started = started.borrow();
    assert_eq!(started[0].limit, Some(5));
    assert_eq!(started[1].limit, Some(50));
    assert_eq!(*w.api.calls.borrow(), *started);
    assert_eq!(w.data.comments().len(), 4);
    assert_eq!(w.data.last_fetch().map(|p| p.offset), Some(2));
}

#[tokio::test]
async fn test_fetch_failure_is_announced_and_returned() {
    let w = bootstrap();
    *w.api.fail_with.borrow_mut() = Some(ServiceError::Status { status: 502, msg: "bad gateway".into() });

    let (failures, on_failed) = recorder::<commentary::ListFailure>();
    w.ctx.on(ListFailed, on_failed).unwrap();
    let fetched = Rc::new(Cell::new(0));
    let f = fetched.clone();
    w.ctx.on(CommentFetched, move |_| f.set(f.get() + 1)).unwrap();

    let err = w.ctx.fetch(ListFetchParams::at(0)).await.unwrap_err();

    assert!(matches!(err, ContextError::Service(ServiceError::Status { status: 502, .. })));
    assert_eq!(fetched.get(), 0);
    let failures = failures.borrow();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].status, Some(502));
    assert!(w.data.comments().is_empty());
}

#[tokio::test]
async fn test_fetch_requires_api_and_mount() {
    let ctx = Context::builder().error_sink(Rc::new(MemorySink::new())).build();
    let early = ctx.fetch(ListFetchParams::at(0)).await.unwrap_err();
    assert!(matches!(early, ContextError::NotMounted));

    ctx.mount(ElementRef::new("#c")).unwrap();
    let missing = ctx.fetch(ListFetchParams::at(0)).await.unwrap_err();
    assert!(matches!(missing, ContextError::ServiceNotRegistered { key: "api" }));
}

#[tokio::test]
async fn test_destroy_during_fetch_suppresses_result() {
    let w = bootstrap();
    let fetched = Rc::new(Cell::new(0));
    let f = fetched.clone();
    w.ctx.on(CommentFetched, move |_| f.set(f.get() + 1)).unwrap();

    let ctx = Rc::clone(&w.ctx);
    let (res, ()) = tokio::join!(ctx.fetch(ListFetchParams::at(0)), async { w.ctx.destroy() });

    assert!(matches!(res, Err(ContextError::ContextDestroyed)));
    assert_eq!(fetched.get(), 0);
}

#[tokio::test]
async fn test_destroy_from_list_fetch_skips_request() {
    let w = bootstrap();
    let weak = Rc::downgrade(&w.ctx);
    w.ctx
        .on(ListFetch, move |_| {
            if let Some(ctx) = weak.upgrade() {
                ctx.destroy();
            }
        })
        .unwrap();

    let err = w.ctx.fetch(ListFetchParams::at(0)).await.unwrap_err();

    assert!(matches!(err, ContextError::ContextDestroyed));
    assert!(w.api.calls.borrow().is_empty());
}

#[test]
fn test_unsubscribe_is_scoped_to_its_context() {
    let a = Context::builder().build();
    let b = Context::builder().build();
    let id_a = a.on(ListReload, |_| ()).unwrap();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    b.on(ListReload, move |_| h.set(h.get() + 1)).unwrap();

    assert!(!b.off(id_a).unwrap());
    b.emit(ListReload, ()).unwrap();

    assert_eq!(hits.get(), 1);
    assert_eq!(a.subscriber_count(ListReload), 1);
}

#[test]
fn test_delegating_facade_methods() {
    let w = bootstrap();

    w.ctx
        .show_sidebar(SidebarShowPayload { view: Some(SidebarView::Settings) })
        .unwrap();
    w.ctx.hide_sidebar().unwrap();
    w.ctx.editor_show_loading().unwrap();
    w.ctx.editor_show_notify("saved", NotifyLevel::Success).unwrap();
    w.ctx.editor_hide_loading().unwrap();
    w.ctx.editor_reset_state().unwrap();

    assert_eq!(
        w.ui.calls(),
        vec![
            "sidebar.show(Some(Settings))",
            "sidebar.hide",
            "editor.show_loading",
            "editor.notify(saved, Success)",
            "editor.hide_loading",
            "editor.reset_state",
        ]
    );
}

#[test]
fn test_checker_callbacks_run() {
    let w = bootstrap();
    let outcome = Rc::new(RefCell::new(Vec::new()));

    let o = outcome.clone();
    w.ctx
        .check_captcha(CaptchaPayload {
            img_data: Some("data:image/png;base64,AAAA".into()),
            checker: CheckerPayload::default().on_success(move || o.borrow_mut().push("captcha ok")),
            ..CaptchaPayload::default()
        })
        .unwrap();
    let o = outcome.clone();
    w.ctx
        .check_admin(CheckerPayload::default().on_cancel(move || o.borrow_mut().push("admin cancelled")))
        .unwrap();

    assert_eq!(*outcome.borrow(), vec!["captcha ok", "admin cancelled"]);
}

#[test]
fn test_emitting_facade_methods() {
    let w = bootstrap();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = seen.clone();
    w.ctx.on(ListReload, move |_| s.borrow_mut().push("reload".to_string())).unwrap();
    let s = seen.clone();
    w.ctx
        .on(CommentReply, move |t| s.borrow_mut().push(format!("reply:{}@{}", t.comment.id, t.element)))
        .unwrap();
    let s = seen.clone();
    w.ctx.on(AdminVisibility, move |_| s.borrow_mut().push("admin".to_string())).unwrap();

    w.ctx.reload().unwrap();
    w.ctx
        .reply_comment(CommentData::new(9, "hey"), ElementRef::new("#c-9"))
        .unwrap();
    w.ctx.check_admin_show_el().unwrap();
    w.ctx.list_goto_first().unwrap();

    assert_eq!(*seen.borrow(), vec!["reload", "reply:9@#c-9", "admin"]);
}

#[test]
fn test_translation_and_optional_services() {
    let w = bootstrap();
    assert_eq!(w.ctx.t("reply", &[]), "Reply");
    assert_eq!(w.ctx.t("counter", &[("count", "3")]), "3 comments");
    assert!(w.ctx.marked().is_none());

    let bare = Context::builder().build();
    bare.mount(ElementRef::new("#c")).unwrap();
    assert_eq!(bare.t("reply", &[]), "reply");
}

#[test]
fn test_facade_before_mount_is_rejected() {
    let ctx = Context::builder().build();
    let sidebar = Rc::new(Recorder::default());
    let as_sidebar: Rc<dyn SidebarController> = sidebar.clone();
    ctx.inject(key::Sidebar, as_sidebar).unwrap();

    assert!(matches!(ctx.hide_sidebar(), Err(ContextError::NotMounted)));
    assert!(matches!(ctx.reload(), Err(ContextError::NotMounted)));
    assert!(sidebar.calls().is_empty());

    ctx.set_dark_mode(true).unwrap();
    assert!(ctx.conf().dark_mode);
}

#[test]
fn test_missing_service_is_surfaced() {
    let ctx = Context::builder().build();
    ctx.mount(ElementRef::new("#c")).unwrap();

    let err = ctx.editor_show_loading().unwrap_err();
    assert!(matches!(err, ContextError::ServiceNotRegistered { key: "editor" }));
    assert!(ctx.data().is_err());
}

#[test]
fn test_mounted_reaches_bootstrap_subscribers() {
    let ctx = Context::builder().build();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["sidebar", "editor", "list"] {
        let o = order.clone();
        ctx.on(Mounted, move |_| o.borrow_mut().push(tag)).unwrap();
    }

    ctx.mount(ElementRef::new("#c")).unwrap();
    assert_eq!(*order.borrow(), vec!["sidebar", "editor", "list"]);
}

#[test]
fn test_failing_subscriber_does_not_break_the_widget() {
    let w = bootstrap();
    let reached = Rc::new(Cell::new(false));

    w.ctx.on(ListReload, |_| Err::<(), _>("list renderer detached")).unwrap();
    let r = reached.clone();
    w.ctx.on(ListReload, move |_| r.set(true)).unwrap();

    w.ctx.reload().unwrap();

    assert!(reached.get());
    let records = w.sink.take();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event, "list-reload");
    assert!(records[0].message.contains("list renderer detached"));
}

#[test]
fn test_plugin_boundary() {
    let w = bootstrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    w.ctx
        .on_named("comment-reply", move |v: &serde_json::Value| {
            s.borrow_mut().push(v["comment"]["id"].as_u64())
        })
        .unwrap();

    w.ctx
        .emit_named(
            "comment-reply",
            serde_json::json!({ "comment": { "id": 4, "content": "x" }, "element": "#c-4" }),
        )
        .unwrap();

    assert_eq!(*seen.borrow(), vec![Some(4)]);
    assert!(w.ctx.emit_named("comment-reply", serde_json::json!(42)).is_err());
    assert!(matches!(
        w.ctx.on_named("comment-vanished", |_: &serde_json::Value| ()),
        Err(ContextError::UnknownEvent { .. })
    ));
}
