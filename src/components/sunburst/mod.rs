//! Zoomable sunburst visualization component.
//!
//! Renders a weighted hierarchy as concentric rings on an HTML canvas:
//! - Angular extent of each slice proportional to its aggregate value
//! - One radial band per depth, square-root spaced so bands keep equal area
//! - Curved labels shown only where they are estimated to fit
//! - Click-to-zoom with animated transitions between focused nodes
//!
//! The geometry core ([`Hierarchy`], [`CoordinateMapper`], [`ArcGeometry`],
//! [`Path`], [`ZoomController`]) has no browser dependency. The component and
//! renderer consume its per-frame [`Frame`] output.
//!
//! # Example
//!
//! ```ignore
//! use imp_sunburst::{SunburstCanvas, SunburstNode};
//!
//! let data = SunburstNode::branch("flare", vec![
//!     SunburstNode::leaf("analytics", 3938.0),
//!     SunburstNode::leaf("util", 1200.0),
//! ]);
//!
//! view! { <SunburstCanvas data=data.into() fullscreen=true /> }
//! ```

mod arc;
mod component;
mod error;
mod hierarchy;
mod path;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;
mod zoom;

pub use arc::{ArcGeometry, SliceBounds};
pub use component::SunburstCanvas;
pub use error::SunburstError;
pub use hierarchy::{Hierarchy, LayoutNode};
pub use path::{ArcSegment, Path, PathCommand};
pub use scale::{CoordinateMapper, Easing, SunburstConfig, ViewDomains};
pub use state::SunburstState;
pub use theme::Theme;
pub use types::{LayoutRect, NodeId, SunburstNode};
pub use zoom::{CircleDecoration, Frame, SliceGeometry, Transition, ZoomController, ZoomState};
