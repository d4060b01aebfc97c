//! GTK4 window host for the interactive diagram view.
//!
//! Controllers only stash input into the engine and queue a redraw; the draw
//! callback is the single place where input is consumed.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::gdk;
use gtk::glib;
use gtk::prelude::*;
use tracing::warn;

use crate::api::{DiagramEngine, DiagramEngineConfig};
use crate::core::{Dataset, NudgeDirection, Viewport};
use crate::error::{DiagramError, DiagramResult};
use crate::render::{CairoContextRenderer, CairoRenderer, Renderer};

const APPLICATION_ID: &str = "rs.diagram.viewer";

type SharedEngine<R> = Rc<RefCell<DiagramEngine<R>>>;

/// Binds a [`DiagramEngine`] to a `DrawingArea`.
pub struct GtkDiagramAdapter<R: Renderer + CairoContextRenderer + 'static> {
    engine: SharedEngine<R>,
    drawing_area: gtk::DrawingArea,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkDiagramAdapter<R> {
    #[must_use]
    pub fn new(engine: DiagramEngine<R>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);

        install_draw_func(&drawing_area, Rc::clone(&engine));
        install_pointer_controllers(&drawing_area, &engine);
        install_key_controller(&drawing_area, &engine);

        Self {
            engine,
            drawing_area,
        }
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine<R> {
        Rc::clone(&self.engine)
    }
}

fn install_draw_func<R: Renderer + CairoContextRenderer + 'static>(
    drawing_area: &gtk::DrawingArea,
    engine: SharedEngine<R>,
) {
    drawing_area.set_draw_func(move |_widget, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        let Ok(mut diagram) = engine.try_borrow_mut() else {
            return;
        };

        let viewport = Viewport::new(width.unsigned_abs(), height.unsigned_abs());
        if let Err(err) = diagram.set_viewport(viewport) {
            warn!(error = %err, "viewport rejected");
            return;
        }
        if let Err(err) = diagram.render_on_cairo_context(context) {
            warn!(error = %err, "diagram render failed");
        }
    });
}

fn install_pointer_controllers<R: Renderer + CairoContextRenderer + 'static>(
    drawing_area: &gtk::DrawingArea,
    engine: &SharedEngine<R>,
) {
    let motion = gtk::EventControllerMotion::new();
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        motion.connect_motion(move |_, x, y| {
            if let Ok(mut diagram) = engine.try_borrow_mut() {
                diagram.pointer_move(x, y);
            }
            drawing_area.queue_draw();
        });
    }
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            if let Ok(mut diagram) = engine.try_borrow_mut() {
                diagram.pointer_leave();
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        scroll.connect_scroll(move |_, _dx, dy| {
            // GTK reports scrolling up as negative dy; up zooms in.
            if let Ok(mut diagram) = engine.try_borrow_mut() {
                diagram.wheel(-dy);
            }
            drawing_area.queue_draw();
            glib::Propagation::Stop
        });
    }
    drawing_area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    {
        let engine = Rc::clone(engine);
        drag.connect_drag_begin(move |_, start_x, start_y| {
            if let Ok(mut diagram) = engine.try_borrow_mut() {
                diagram.pan_start();
                diagram.pan_drag(start_x, start_y);
            }
        });
    }
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                if let Ok(mut diagram) = engine.try_borrow_mut() {
                    diagram.pan_drag(start_x + offset_x, start_y + offset_y);
                }
            }
            drawing_area.queue_draw();
        });
    }
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_end(move |_, _, _| {
            if let Ok(mut diagram) = engine.try_borrow_mut() {
                diagram.pan_end();
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(drag);
}

fn install_key_controller<R: Renderer + CairoContextRenderer + 'static>(
    drawing_area: &gtk::DrawingArea,
    engine: &SharedEngine<R>,
) {
    let keys = gtk::EventControllerKey::new();
    let engine = Rc::clone(engine);
    let area = drawing_area.clone();
    keys.connect_key_pressed(move |_, key, _code, _state| {
        let direction = match key {
            gdk::Key::Left => NudgeDirection::Left,
            gdk::Key::Up => NudgeDirection::Up,
            gdk::Key::Right => NudgeDirection::Right,
            gdk::Key::Down => NudgeDirection::Down,
            _ => return glib::Propagation::Proceed,
        };
        if let Ok(mut diagram) = engine.try_borrow_mut() {
            diagram.key(direction);
        }
        area.queue_draw();
        glib::Propagation::Stop
    });
    drawing_area.add_controller(keys);
}

/// Opens a window showing `dataset` and blocks until it is closed.
///
/// The canvas size in `config` is only the initial window size; the draw
/// callback follows the widget allocation.
pub fn run_window(dataset: Dataset, config: DiagramEngineConfig) -> DiagramResult<()> {
    config.validate()?;
    let title = format!("diagram: {}", dataset.kind());
    let width = i32::try_from(config.viewport.width).unwrap_or(i32::MAX);
    let height = i32::try_from(config.viewport.height).unwrap_or(i32::MAX);
    let surface = CairoRenderer::new(1, 1)?;
    let engine = DiagramEngine::new(surface, config, dataset)?;
    let engine = Rc::new(RefCell::new(Some(engine)));

    let app = gtk::Application::builder()
        .application_id(APPLICATION_ID)
        .build();
    app.connect_activate(move |app| {
        let Some(engine) = engine.borrow_mut().take() else {
            return;
        };
        let adapter = GtkDiagramAdapter::new(engine);
        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title(title.as_str())
            .default_width(width)
            .default_height(height)
            .build();
        window.set_child(Some(adapter.drawing_area()));
        window.present();
        adapter.drawing_area().grab_focus();
    });
    exit_status(app.run_with_args::<&str>(&[]))
}

fn exit_status(code: glib::ExitCode) -> DiagramResult<()> {
    if code == glib::ExitCode::SUCCESS {
        return Ok(());
    }
    warn!(code = code.value(), "window host exited with failure");
    Err(DiagramError::WindowHost(code.value()))
}
