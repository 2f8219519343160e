//! Rendering seam
//!
//! The core never touches pixels. Each tick it describes every jubble as a
//! [`Sprite`] of plain circles and lines and hands it to a [`Renderer`]:
//! once in background colour to erase the old footprint, once to draw the
//! new state.

use crate::colour::{decomposition_colour, Colour};
use crate::components::AgentId;
use crate::config::SimConfig;
use crate::geometry::Point;
use crate::jubble::Jubble;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        centre: Point,
        radius: f64,
        colour: Colour,
    },
    Line {
        from: Point,
        to: Point,
        colour: Colour,
        width: u32,
    },
}

impl Primitive {
    fn with_colour(&self, colour: Colour) -> Self {
        match *self {
            Primitive::Circle { centre, radius, .. } => Primitive::Circle { centre, radius, colour },
            Primitive::Line { from, to, width, .. } => Primitive::Line { from, to, colour, width },
        }
    }
}

/// Everything needed to draw one jubble, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: AgentId,
    pub primitives: Vec<Primitive>,
}

impl Sprite {
    /// Describe `jubble` as it should look right now.
    ///
    /// `goal_target` is the position of the jubble it is chasing, if that
    /// jubble is still in the population.
    pub fn compose(jubble: &Jubble, goal_target: Option<Point>, config: &SimConfig) -> Self {
        let mut primitives = Vec::with_capacity(5);
        let centre = jubble.position;
        let radius = jubble.radius();

        let body_colour = match jubble.decomposition_fraction() {
            Some(fraction) => decomposition_colour(fraction),
            None => {
                let half = jubble.detection_slice / 2.0;
                for edge in [jubble.angle - half, jubble.angle + half] {
                    primitives.push(Primitive::Line {
                        from: centre,
                        to: centre.offset(edge, config.view_line_length),
                        colour: config.view_line_colour,
                        width: config.view_line_width,
                    });
                }
                if let Some(target) = goal_target.filter(|_| jubble.has_agent_goal()) {
                    primitives.push(Primitive::Line {
                        from: centre,
                        to: target,
                        colour: config.goal_line_colour,
                        width: 1,
                    });
                }
                jubble.colour
            }
        };

        primitives.push(Primitive::Circle { centre, radius, colour: body_colour });
        primitives.push(Primitive::Line {
            from: centre,
            to: centre.offset(jubble.angle, config.nose_to_body * radius),
            colour: body_colour,
            width: config.nose_width,
        });

        Self { id: jubble.id(), primitives }
    }

    /// The same shapes painted in a single colour, e.g. the background to
    /// erase a footprint.
    pub fn recoloured(&self, colour: Colour) -> Self {
        Self {
            id: self.id,
            primitives: self.primitives.iter().map(|p| p.with_colour(colour)).collect(),
        }
    }
}

/// Consumer of the visual side effects of a tick.
pub trait Renderer {
    /// Paint over where a jubble was drawn last tick.
    fn erase_footprint(&mut self, sprite: &Sprite);
    /// Draw a jubble's current state.
    fn draw_agent(&mut self, sprite: &Sprite);
}

/// Renderer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn erase_footprint(&mut self, _sprite: &Sprite) {}
    fn draw_agent(&mut self, _sprite: &Sprite) {}
}
