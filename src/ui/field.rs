//! Playfield rendering on a braille sub-cell grid (2x4 dots per cell)

use std::collections::HashMap;

use glam::Vec2;
use ratatui::prelude::*;

use crate::sim::{Asteroid, AsteroidSize, Bounds, EntityRef, Projectile, Session, Ship};

type Dots = HashMap<(usize, usize), u8>;

const BG: Color = Color::Rgb(5, 5, 15);

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cx = x0;
    let mut cy = y0;
    loop {
        cells.push((cx, cy));
        if cx == x1 && cy == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; cx += sx; }
        if e2 <= dx { err += dx; cy += sy; }
    }
    cells
}

/// Irregular outline for a rock, stable per `shape_seed`, turned by its spin.
fn asteroid_verts(asteroid: &Asteroid) -> Vec<Vec2> {
    let n = match asteroid.size {
        AsteroidSize::Large => 11,
        AsteroidSize::Medium => 9,
        AsteroidSize::Small => 7,
    };
    let r = asteroid.body.radius;
    let spin = asteroid.rotation_angle.to_radians();
    let mut verts = Vec::with_capacity(n);
    let mut s = u32::from(asteroid.shape_seed);
    for i in 0..n {
        let angle = (i as f32 / n as f32) * std::f32::consts::TAU + spin;
        s = s.wrapping_mul(1103515245).wrapping_add(12345);
        let variation = 0.75 + ((s >> 16) % 250) as f32 / 1000.0; // 0.75 - 1.0
        verts.push(asteroid.body.position + Vec2::from_angle(angle) * r * variation);
    }
    verts
}

/// Point in the ship's frame (nose along -y) to world space
fn ship_point(ship: &Ship, local: Vec2) -> Vec2 {
    ship.body.position + Vec2::from_angle(ship.heading.to_radians()).rotate(local)
}

/// Blink at 5 Hz while the respawn window runs
fn ship_visible(ship: &Ship) -> bool {
    !ship.is_invulnerable() || (ship.invulnerable_time * 10.0) as i64 % 2 != 0
}

/// World-to-dot mapping plus the cell grid being painted
pub struct Field {
    width: usize,
    height: usize,
    /// Dot-space rectangle the world maps onto
    origin: (f32, f32),
    world_dots: (i32, i32, i32, i32),
    scale: f32,
    grid: Vec<Vec<(char, Style)>>,
}

impl Field {
    /// Fit `bounds` into `width` x `height` cells, keeping the aspect ratio.
    pub fn new(width: usize, height: usize, bounds: Bounds) -> Self {
        let bw = (width * 2) as f32;
        let bh = (height * 4) as f32;
        let scale = (bw / bounds.width).min(bh / bounds.height);
        let ox = (bw - bounds.width * scale) / 2.0;
        let oy = (bh - bounds.height * scale) / 2.0;
        let world_dots = (
            ox as i32,
            oy as i32,
            (ox + bounds.width * scale) as i32,
            (oy + bounds.height * scale) as i32,
        );

        let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(BG)); width]; height];

        // Sparse background stars (regular chars, not braille)
        for (yi, row) in grid.iter_mut().enumerate() {
            for (xi, cell) in row.iter_mut().enumerate() {
                let hash = ((xi * 7 + yi * 13 + 37) * 31) % 250;
                if hash < 2 {
                    let b = 35 + (hash as u8) * 15;
                    *cell = ('.', Style::default().fg(Color::Rgb(b, b, b + 8)).bg(BG));
                }
            }
        }

        Self {
            width,
            height,
            origin: (ox, oy),
            world_dots,
            scale,
            grid,
        }
    }

    fn to_dot(&self, p: Vec2) -> (i32, i32) {
        (
            (self.origin.0 + p.x * self.scale) as i32,
            (self.origin.1 + p.y * self.scale) as i32,
        )
    }

    /// Set a dot, clipped to the world rectangle
    fn plot(&self, dots: &mut Dots, bx: i32, by: i32) {
        let (x0, y0, x1, y1) = self.world_dots;
        if bx < x0 || by < y0 || bx >= x1 || by >= y1 { return; }
        let cx = bx as usize / 2;
        let cy = by as usize / 4;
        if cx >= self.width || cy >= self.height { return; }
        *dots.entry((cx, cy)).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
    }

    fn polyline(&self, dots: &mut Dots, pts: &[Vec2], closed: bool) {
        let n = pts.len();
        let segments = if closed { n } else { n.saturating_sub(1) };
        for i in 0..segments {
            let (x0, y0) = self.to_dot(pts[i]);
            let (x1, y1) = self.to_dot(pts[(i + 1) % n]);
            for (px, py) in line_cells(x0, y0, x1, y1) {
                self.plot(dots, px, py);
            }
        }
    }

    /// Write a dot layer onto the grid, merging with braille already there
    fn paint(&mut self, dots: &Dots, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in dots {
            if bits == 0 { continue; }
            let mut style = Style::default().fg(color).bg(BG);
            if bold { style = style.add_modifier(Modifier::BOLD); }
            let existing = self.grid[cy][cx].0 as u32;
            let merged = if (0x2800..0x2900).contains(&existing) {
                (existing - 0x2800) as u8 | bits
            } else {
                bits
            };
            let ch = char::from_u32(0x2800 + u32::from(merged)).unwrap_or(' ');
            self.grid[cy][cx] = (ch, style);
        }
    }

    /// Dim frame around the world so the edges bullets die at are visible
    fn draw_border(&mut self) {
        let (x0, y0, x1, y1) = self.world_dots;
        let mut dots = Dots::new();
        let (x1, y1) = (x1 - 1, y1 - 1);
        for (a, b) in [((x0, y0), (x1, y0)), ((x1, y0), (x1, y1)), ((x1, y1), (x0, y1)), ((x0, y1), (x0, y0))] {
            for (px, py) in line_cells(a.0, a.1, b.0, b.1) {
                self.plot(&mut dots, px, py);
            }
        }
        self.paint(&dots, Color::Rgb(30, 35, 60), false);
    }

    fn draw_asteroid(&mut self, asteroid: &Asteroid) {
        let mut dots = Dots::new();
        self.polyline(&mut dots, &asteroid_verts(asteroid), true);
        let s = asteroid.size.shade();
        let tint = s.saturating_add(20);
        self.paint(&dots, Color::Rgb(tint, s, s.saturating_sub(20)), false);
    }

    fn draw_projectile(&mut self, projectile: &Projectile, full_lifetime: f32) {
        let mut dots = Dots::new();
        let brightness = if projectile.remaining_lifetime > full_lifetime / 2.0 { 255 } else { 180 };

        // Head dot (2x2 braille pixels for visibility)
        let (bx, by) = self.to_dot(projectile.body.position);
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            self.plot(&mut dots, bx + dx, by + dy);
        }
        // Trail dot
        let (tx, ty) = self.to_dot(projectile.body.position - projectile.body.velocity * 0.02);
        self.plot(&mut dots, tx, ty);

        self.paint(&dots, Color::Rgb(brightness, brightness, 80), true);
    }

    fn draw_ship(&mut self, ship: &Ship, thrusting: bool, frame_count: u64) {
        if !ship_visible(ship) {
            return;
        }
        let r = ship.body.radius;
        // nose, right wing, notch, left wing
        let hull = [
            Vec2::new(0.0, -1.5 * r),
            Vec2::new(r, r),
            Vec2::new(0.0, 0.5 * r),
            Vec2::new(-r, r),
        ]
        .map(|p| ship_point(ship, p));

        let mut hull_dots = Dots::new();
        self.polyline(&mut hull_dots, &hull, true);
        let ship_color = if thrusting { Color::Rgb(100, 230, 255) } else { Color::Rgb(80, 255, 140) };
        self.paint(&hull_dots, ship_color, true);

        if thrusting {
            let flame = [
                Vec2::new(0.7 * r, 1.5 * r),
                Vec2::new(0.0, 2.5 * r),
                Vec2::new(-0.7 * r, 1.5 * r),
            ]
            .map(|p| ship_point(ship, p));
            let mut flame_dots = Dots::new();
            self.polyline(&mut flame_dots, &flame, false);
            // Don't overwrite ship cells
            for key in hull_dots.keys() {
                flame_dots.remove(key);
            }
            let flicker = if frame_count % 3 == 0 { Color::Rgb(255, 200, 60) } else { Color::Rgb(255, 130, 30) };
            self.paint(&flame_dots, flicker, false);
        }
    }

    pub fn draw_session(&mut self, session: &Session, frame_count: u64) {
        self.draw_border();
        let bounds = session.config().bounds();
        let mut ship = None;
        for entity in session.entities() {
            let body = entity.body();
            // Nothing of it inside the world
            if body.position.x + body.radius < 0.0
                || body.position.y + body.radius < 0.0
                || body.position.x - body.radius > bounds.width
                || body.position.y - body.radius > bounds.height
            {
                continue;
            }
            match entity {
                EntityRef::Ship(s) => ship = Some(s),
                EntityRef::Asteroid(a) => self.draw_asteroid(a),
                EntityRef::Projectile(p) => self.draw_projectile(p, session.config().bullet_lifetime),
            }
        }
        // Ship last so it sits on top
        if let Some(ship) = ship {
            let thrusting = ship.intent.accelerating && !session.is_game_over();
            self.draw_ship(ship, thrusting, frame_count);
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

pub fn render_field(session: &Session, frame_count: u64, width: usize, height: usize) -> Vec<Line<'static>> {
    let mut field = Field::new(width, height, session.config().bounds());
    field.draw_session(session, frame_count);
    field.into_lines()
}
