//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in surface pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient(r, color, color)
}

/// Rectangle shading from `top` to `bottom`
pub fn vertical_gradient(r: Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (r.min(), r.max());
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Place a shape given in unit coordinates (centered on the origin, the
/// bounding box spanning -0.5..0.5) into a `size` box around `center`,
/// rotated by `rotation` radians.
pub fn place(points: &[Vec2], center: Vec2, size: Vec2, rotation: f32) -> Vec<Vec2> {
    let turn = Vec2::from_angle(rotation);
    points
        .iter()
        .map(|p| center + turn.rotate(*p * size))
        .collect()
}

/// Generate vertices for a convex polygon (triangle fan from the first point)
pub fn convex_polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Generate vertices for a line strip of the given width
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        // Perpendicular for width
        let perp = (p2 - p1).normalize_or_zero().perp() * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_gradient_colors_by_edge() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        for v in vertical_gradient(Rect::new(0.0, 0.0, 10.0, 10.0), top, bottom) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 12).len(), 36);
    }

    #[test]
    fn test_place_rotates_and_scales() {
        let unit = [Vec2::new(0.5, 0.0)];
        let placed = place(&unit, Vec2::new(100.0, 100.0), Vec2::new(80.0, 30.0), PI / 2.0);
        assert!((placed[0] - Vec2::new(100.0, 140.0)).length() < 1e-4);
    }

    #[test]
    fn test_polygon_fan() {
        let hexagon: Vec<Vec2> = (0..6)
            .map(|i| Vec2::from_angle(i as f32 * PI / 3.0))
            .collect();
        assert_eq!(convex_polygon(&hexagon, [1.0; 4]).len(), 12);
        assert!(convex_polygon(&hexagon[..2], [1.0; 4]).is_empty());
    }

    #[test]
    fn test_polyline_segments() {
        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)];
        let verts = polyline(&points, 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 12);
        assert!(verts.iter().all(|v| v.position[1].abs() == 1.0));
    }
}
