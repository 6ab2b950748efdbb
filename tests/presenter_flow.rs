//! End-to-end: strokes drawn on the surface engine, saved and restored
//! across slide changes by the presenter.

use std::sync::Arc;

use slidemark::config::Config;
use slidemark::presenter::{Presenter, SaveStatus};
use slidemark::session::{JoinCode, SessionContext, SessionJoinResponse};
use slidemark::store::{AnnotationStore, MemoryStore};
use surface::doc::{Color, Tool};
use surface::engine::{Action, EngineCore};
use surface::input::PointerSource;
use surface::transform::Point;

fn session() -> SessionContext {
    let response: SessionJoinResponse = serde_json::from_str(
        r#"{"sessionId":"live-1","presentationId":"deck-7","currentSlideNumber":0,"slideCount":3,"title":"Demo"}"#,
    )
    .expect("join response");
    let code = JoinCode::parse("ZX9").expect("join code");
    SessionContext::from_join(&Config::default(), code, response, None)
}

fn engine() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0);
    core.set_image_loaded(1920.0, 1080.0);
    core
}

/// Forward the engine's change notifications to the presenter, as a host would.
fn forward(presenter: &mut Presenter<MemoryStore>, actions: Vec<Action>) {
    for action in actions {
        if let Action::StrokesChanged(list) = action {
            presenter.apply_change(list);
        }
    }
}

fn draw(core: &mut EngineCore, presenter: &mut Presenter<MemoryStore>, from: Point, to: Point) {
    let actions = core.on_pointer_down(from, PointerSource::Mouse);
    forward(presenter, actions);
    let actions = core.on_pointer_move(to);
    forward(presenter, actions);
    let actions = core.on_pointer_up();
    forward(presenter, actions);
}

#[tokio::test]
async fn strokes_survive_slide_round_trip() {
    let backend = Arc::new(MemoryStore::default());
    let mut presenter = Presenter::open(Arc::clone(&backend), session(), 1).await.expect("open");
    let mut core = engine();
    core.load_strokes(presenter.strokes().clone());

    core.select_color(Color::rgb(0xdf, 0x4b, 0x26));
    draw(&mut core, &mut presenter, Point::new(100.0, 100.0), Point::new(200.0, 150.0));
    core.select_tool(Tool::Eraser);
    draw(&mut core, &mut presenter, Point::new(120.0, 110.0), Point::new(180.0, 140.0));
    assert_eq!(presenter.status(), SaveStatus::Unsaved);
    assert_eq!(presenter.strokes(), core.strokes());

    let drawn = core.strokes().clone();
    let change = presenter.next().await.expect("next");
    assert_eq!(change.slide, 2);
    assert!(change.strokes.is_empty());
    core.load_strokes(change.strokes);
    assert!(core.strokes().is_empty());

    let back = presenter.previous().await.expect("previous");
    core.load_strokes(back.strokes);
    assert_eq!(core.strokes(), &drawn);
    assert_eq!(backend.current_slide("live-1").await, Some(1));

    let first = &core.strokes().as_slice()[0];
    assert_eq!(first.tool, Tool::Pen);
    assert!((first.points[0] - 240.0).abs() < 1e-9);
    assert!((first.points[1] - 60.0).abs() < 1e-9);
    assert!(core.strokes().as_slice()[1].is_eraser());
}

#[tokio::test]
async fn undo_and_clear_flow_into_saved_document() {
    let backend = Arc::new(MemoryStore::default());
    let mut presenter = Presenter::open(Arc::clone(&backend), session(), 1).await.expect("open");
    let mut core = engine();

    draw(&mut core, &mut presenter, Point::new(10.0, 80.0), Point::new(20.0, 90.0));
    draw(&mut core, &mut presenter, Point::new(30.0, 100.0), Point::new(40.0, 110.0));
    let actions = core.undo();
    forward(&mut presenter, actions);
    presenter.save().await.expect("save");

    let slide = presenter.session().slide_ref(1).expect("slide ref");
    let saved = backend.load_strokes(&slide).await.expect("load");
    assert_eq!(saved.len(), 1);

    let actions = core.clear();
    forward(&mut presenter, actions);
    presenter.save().await.expect("save");
    assert!(backend.load_strokes(&slide).await.expect("load").is_empty());
}
