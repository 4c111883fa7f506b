use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use log::warn;

use super::hud::with_session;
use super::state::AppState;
use crate::game::PanelColor;
use crate::game::panel::{PANEL_COUNT, grid_position};

pub const CONTENT_MARGIN: i32 = 12;
pub const PANEL_GAP: i32 = 18;

const GLOW_SPREAD: f64 = 1.35;

fn paint_panel(
    cr: &cairo::Context,
    width: f64,
    height: f64,
    color: PanelColor,
) -> Result<(), cairo::Error> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = width.min(height) / 2.0 / GLOW_SPREAD;
    let (r, g, b) = color.rgb();

    if color == PanelColor::Lit {
        let glow = cairo::RadialGradient::new(cx, cy, radius * 0.8, cx, cy, radius * GLOW_SPREAD);
        glow.add_color_stop_rgba(0.0, r, g, b, 0.8);
        glow.add_color_stop_rgba(1.0, r, g, b, 0.0);
        cr.set_source(&glow)?;
        cr.arc(cx, cy, radius * GLOW_SPREAD, 0.0, 2.0 * PI);
        cr.fill()?;
    }

    cr.set_antialias(cairo::Antialias::Best);
    cr.set_source_rgb(r, g, b);
    cr.arc(cx, cy, radius, 0.0, 2.0 * PI);
    cr.fill()
}

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("genius-board");
    grid.set_row_spacing(PANEL_GAP as u32);
    grid.set_column_spacing(PANEL_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);

    let mut buttons = Vec::with_capacity(PANEL_COUNT);

    for index in 0..PANEL_COUNT {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["genius-panel", PanelColor::Idle.css_class()])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();

        let state_draw = state.clone();
        drawing_area.set_draw_func(move |_, cr, width, height| {
            let Ok(st) = state_draw.try_borrow() else {
                return;
            };
            let color = st.panel_colors[index];
            if let Err(err) = paint_panel(cr, width as f64, height as f64, color) {
                warn!("Failed to paint panel {index}: {err}");
            }
        });
        button.set_child(Some(&drawing_area));

        let state_click = state.clone();
        button.connect_clicked(move |_| {
            with_session(&state_click, |session| {
                if let Err(err) = session.press(index) {
                    warn!("{err}");
                }
            });
        });

        aspect_frame.set_child(Some(&button));
        let (row, col) = grid_position(index);
        grid.attach(&aspect_frame, col as i32, row as i32, 1, 1);
        buttons.push(button);
    }

    state.borrow_mut().panel_buttons = buttons;

    grid
}
