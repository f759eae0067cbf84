//! Camera: world units to screen pixels
//!
//! The camera shows a window of the unbounded world. Zoom is the number of
//! world units of vertical extent on screen; horizontal extent follows from
//! the aspect ratio, so a non-square screen does not distort world shapes.
//! The projection is stateless: it is recomputed from camera position and
//! zoom on every call and never touches object state.

use glam::Vec2;

use crate::consts::DEFAULT_CAM_ZOOM;
use crate::sim::{RenderKind, WorldObject};

/// One object's footprint on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels (blit offset for backdrops)
    pub screen_pos: Vec2,
    /// Screen size in pixels
    pub screen_size: Vec2,
    /// Rotation in degrees, passed through for the renderer to apply
    pub rotation: f32,
    /// Entirely off screen; skip drawing but keep simulating
    pub culled: bool,
}

/// Camera position/zoom plus the fixed screen geometry.
#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec2,
    zoom: f32,
    screen: Vec2,
    /// screen width / height, fixed at construction
    aspect: f32,
}

impl Camera {
    /// Camera at the world origin with the default zoom.
    pub fn new(screen: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: DEFAULT_CAM_ZOOM,
            screen,
            aspect: screen.x / screen.y,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Point the camera at a world position (center of view).
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Set the vertical world extent visible on screen.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Pixels per world unit on each axis.
    #[inline]
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            self.screen.x / (self.zoom * self.aspect),
            self.screen.y / self.zoom,
        )
    }

    /// World units visible on screen: (zoom * aspect, zoom).
    #[inline]
    pub fn visible_extent(&self) -> Vec2 {
        Vec2::new(self.zoom * self.aspect, self.zoom)
    }

    /// Project one object into screen space.
    pub fn project(&self, object: &WorldObject) -> Projection {
        match object.kind {
            RenderKind::Standard => self.project_standard(object),
            RenderKind::Backdrop => self.project_backdrop(object),
        }
    }

    /// Camera-relative position, shifted so the camera maps to the screen
    /// center, then scaled to pixels. Culled when the bounding box falls
    /// entirely outside the screen rectangle.
    fn project_standard(&self, object: &WorldObject) -> Projection {
        let scale = self.scale();
        let half_extent = self.visible_extent() / 2.0;

        let screen_size = object.size * scale;
        let screen_pos = (object.pos - self.pos + half_extent) * scale;

        let culled = screen_pos.x < -screen_size.x
            || screen_pos.x - screen_size.x / 2.0 > self.screen.x
            || screen_pos.y < -screen_size.y
            || screen_pos.y - screen_size.y / 2.0 > self.screen.y;

        Projection {
            screen_pos,
            screen_size,
            rotation: object.rotation(),
            culled,
        }
    }

    /// The map backdrop: its own center is the world origin, so offsets from
    /// that center come in with flipped signs. Always drawn (clipped to the
    /// visible rectangle by the renderer), never culled.
    fn project_backdrop(&self, object: &WorldObject) -> Projection {
        let scale = self.scale();
        let half_extent = self.visible_extent() / 2.0;
        let origin = object.size / 2.0;

        let screen_pos = (-self.pos - origin + half_extent) * scale;
        let screen_size = object.size * scale;

        Projection {
            screen_pos,
            screen_size,
            rotation: object.rotation(),
            culled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        // 1000x500 screen, aspect 2.0; zoom 10 => 20x10 world units visible
        let mut camera = Camera::new(Vec2::new(1000.0, 500.0));
        camera.set_zoom(10.0);
        camera
    }

    #[test]
    fn test_scale_factors() {
        let camera = test_camera();
        assert_eq!(camera.scale(), Vec2::new(50.0, 50.0));
        assert_eq!(camera.visible_extent(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_object_at_camera_maps_to_screen_center() {
        let mut camera = test_camera();
        camera.set_pos(Vec2::new(123.0, -456.0));
        let obj = WorldObject::new(Vec2::new(123.0, -456.0), Vec2::ONE, 0.0);

        for zoom in [1.0, 10.0, 250.0] {
            camera.set_zoom(zoom);
            let proj = camera.project(&obj);
            assert!((proj.screen_pos.x - 500.0).abs() < 1e-3);
            assert!((proj.screen_pos.y - 250.0).abs() < 1e-3);
            assert!(!proj.culled);
        }
    }

    #[test]
    fn test_screen_size_in_pixels() {
        let camera = test_camera();
        let obj = WorldObject::new(Vec2::ZERO, Vec2::new(2.0, 4.0), 0.0);
        let proj = camera.project(&obj);
        assert_eq!(proj.screen_size, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_rotation_passes_through() {
        let camera = test_camera();
        let obj = WorldObject::new(Vec2::ZERO, Vec2::ONE, 45.0);
        assert_eq!(camera.project(&obj).rotation, 45.0);
    }

    #[test]
    fn test_culled_beyond_right_edge_until_recentered() {
        let mut camera = test_camera();
        // 15 units right of the camera; only 10 are visible on that side
        let obj = WorldObject::new(Vec2::new(15.0, 0.0), Vec2::ONE, 0.0);

        let proj = camera.project(&obj);
        assert!(proj.culled);

        camera.set_pos(obj.pos);
        let proj = camera.project(&obj);
        assert!(!proj.culled);
        assert!((proj.screen_pos.x - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_partially_visible_object_not_culled() {
        let camera = test_camera();
        // Straddles the left edge: on-screen x spans around 0
        let obj = WorldObject::new(Vec2::new(-10.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        let proj = camera.project(&obj);
        assert!(!proj.culled);
    }

    #[test]
    fn test_culled_object_keeps_position() {
        let camera = test_camera();
        let obj = WorldObject::new(Vec2::new(0.0, 100.0), Vec2::ONE, 0.0);
        let proj = camera.project(&obj);
        assert!(proj.culled);
        // Projection still carries a meaningful position for the record
        assert!((proj.screen_pos.y - (100.0 + 5.0) * 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_backdrop_never_culled() {
        let mut camera = test_camera();
        camera.set_pos(Vec2::new(1e6, 1e6));
        let map = WorldObject::backdrop(Vec2::new(100.0, 100.0));
        let proj = camera.project(&map);
        assert!(!proj.culled);
    }

    #[test]
    fn test_backdrop_center_origin_offsets() {
        let camera = test_camera();
        let map = WorldObject::backdrop(Vec2::new(100.0, 100.0));
        let proj = camera.project(&map);
        // (-cam - size/2 + visible/2) * scale, camera at origin
        assert_eq!(proj.screen_pos, Vec2::new(-2000.0, -2250.0));
        assert_eq!(proj.screen_size, Vec2::new(5000.0, 5000.0));
    }

    #[test]
    fn test_backdrop_tracks_camera_with_flipped_sign() {
        let mut camera = test_camera();
        let map = WorldObject::backdrop(Vec2::new(100.0, 100.0));
        let at_origin = camera.project(&map).screen_pos;
        camera.set_pos(Vec2::new(4.0, 0.0));
        let moved = camera.project(&map).screen_pos;
        // Camera moved +4 units; backdrop slides the other way
        assert_eq!(moved.x - at_origin.x, -4.0 * 50.0);
        assert_eq!(moved.y, at_origin.y);
    }
}
