//! Polygon figure editor core.
//!
//! This crate owns the editing lifecycle of a figure canvas: polygons drawn
//! on top of a fixed background image, selected, dragged, and rotated with
//! the pointer. Raw pointer events go in; redraws, cursor hints, and a final
//! polygon set come out. The host is responsible only for supplying the
//! background, wiring events, and storing the resulting [`session::Outcome`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller ([`engine::EngineCore`]) and browser-bound [`engine::Engine`] |
//! | [`session`] | One editing lifecycle, its outcome, and scoped listener subscriptions |
//! | [`figure`] | Points, bounds, and the [`figure::Figure`] polygon |
//! | [`doc`] | Insertion-ordered figure collection and polygon-set codec |
//! | [`input`] | Pointer events, interaction states, and the in-progress polygon |
//! | [`hit`] | Hit-testing against figures and rotation handles |
//! | [`render`] | Full-scene redraw |
//! | [`surface`] | Render-surface contract |
//! | [`recording`] | In-memory surface for tests and native hosts |
//! | [`web`] | `CanvasRenderingContext2d` surface and DOM listeners |
//! | [`viewport`] | Client-to-canvas coordinate scaling and popup fit |
//! | [`consts`] | Shared numeric and color constants |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod figure;
pub mod hit;
pub mod input;
pub mod recording;
pub mod render;
pub mod session;
pub mod surface;
pub mod viewport;
pub mod web;
