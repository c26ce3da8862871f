//! Per-tick painting: background, particle discs and connection edges.

use crate::canvas::Canvas;
use crate::config::{EdgeStrategy, FieldConfig};
use crate::grid::SpatialHashGrid;
use crate::math::linear_falloff;
use crate::palette::{edge_color, particle_color, Color, Theme};
use crate::particle::Particle;
use glam::Vec2;

/// A connection between two steady particles, `a < b` as collection indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Edge opacity for two particles `dist` apart, or `None` if they are too far to connect.
pub fn edge_alpha(dist: f32, config: &FieldConfig) -> Option<f32> {
    if dist < config.connect_distance {
        Some(linear_falloff(dist, config.connect_distance) * config.edge_alpha)
    } else {
        None
    }
}

/// Finds connection edges, reusing its buffers between ticks.
pub struct EdgeFinder {
    grid: SpatialHashGrid,
    entries: Vec<(u32, Vec2)>,
}

impl EdgeFinder {
    pub fn new(connect_distance: f32) -> Self {
        Self {
            grid: SpatialHashGrid::new(connect_distance, 4096),
            entries: Vec::new(),
        }
    }

    /// Fill `out` with every steady pair closer than `connect_distance`,
    /// sorted by `(a, b)`. Trail particles never connect.
    pub fn find(&mut self, particles: &[Particle], config: &FieldConfig, out: &mut Vec<Edge>) {
        out.clear();
        match config.edge_strategy {
            EdgeStrategy::Pairwise => find_pairwise(particles, config, out),
            EdgeStrategy::Grid => self.find_grid(particles, config, out),
        }
    }

    fn find_grid(&mut self, particles: &[Particle], config: &FieldConfig, out: &mut Vec<Edge>) {
        self.entries.clear();
        self.entries.extend(
            particles
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_steady())
                .map(|(i, p)| (i as u32, p.position)),
        );

        self.grid.set_cell_size(config.connect_distance);
        self.grid.build(&self.entries);

        for &(id, pos) in &self.entries {
            let a = id as usize;
            self.grid.query_neighbors(pos, |other| {
                let b = other as usize;
                if b <= a {
                    return;
                }
                let dist = pos.distance(particles[b].position);
                if let Some(alpha) = edge_alpha(dist, config) {
                    out.push(Edge { a, b, alpha });
                }
            });
        }

        out.sort_unstable_by_key(|e| (e.a, e.b));
    }
}

fn find_pairwise(particles: &[Particle], config: &FieldConfig, out: &mut Vec<Edge>) {
    for (a, p) in particles.iter().enumerate() {
        if !p.is_steady() {
            continue;
        }
        for (b, q) in particles.iter().enumerate().skip(a + 1) {
            if !q.is_steady() {
                continue;
            }
            if let Some(alpha) = edge_alpha(p.position.distance(q.position), config) {
                out.push(Edge { a, b, alpha });
            }
        }
    }
}

/// Paints one frame. Holds reusable scratch space only; all simulation state
/// lives in the field.
pub struct Renderer {
    edges: EdgeFinder,
    edge_buf: Vec<Edge>,
}

impl Renderer {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            edges: EdgeFinder::new(config.connect_distance),
            edge_buf: Vec::new(),
        }
    }

    pub fn paint_background(&self, canvas: &mut dyn Canvas, background: &Color, viewport: Vec2) {
        canvas.fill_background(background, viewport);
    }

    /// Draw each particle in collection order, each followed by its edges to
    /// later particles, so later particles paint over earlier edges.
    pub fn paint_particles(
        &mut self,
        canvas: &mut dyn Canvas,
        particles: &[Particle],
        theme: Theme,
        config: &FieldConfig,
    ) {
        self.edges.find(particles, config, &mut self.edge_buf);

        let mut edges = self.edge_buf.iter().peekable();
        for (i, p) in particles.iter().enumerate() {
            canvas.fill_circle(p.position, p.size, &particle_color(p, theme));

            while let Some(edge) = edges.next_if(|e| e.a == i) {
                canvas.stroke_line(
                    p.position,
                    particles[edge.b].position,
                    config.edge_width,
                    &edge_color(theme, edge.alpha),
                );
            }
        }
    }

    /// Edges found during the last `paint_particles` call.
    pub fn last_edges(&self) -> &[Edge] {
        &self.edge_buf
    }
}
