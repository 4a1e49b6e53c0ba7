//! Camera/viewport model for the map canvas
//!
//! The camera's `offset` is the world point shown at the centre of the
//! viewport. A screen pixel `p` therefore maps to the world point
//! `offset + (p - size / 2) / scale`, see [`crate::canvas::coords`].

use bevy::math::Vec2;

/// Zoom limits and wheel response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    pub min: f32,
    pub max: f32,
    /// Zoom values are rounded to multiples of this step
    pub step: f32,
    /// Scale change per unit of wheel delta (browser-style, positive delta zooms out)
    pub wheel_sensitivity: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 4.0,
            step: 0.1,
            wheel_sensitivity: 0.001,
        }
    }
}

impl ZoomSettings {
    /// Round to the nearest step and clamp into `[min, max]`. NaN maps to `min`.
    pub fn quantize(&self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.min;
        }
        let steps_per_unit = (1.0 / self.step).round();
        ((zoom * steps_per_unit).round() / steps_per_unit).clamp(self.min, self.max)
    }
}

/// Pan/zoom transform between world and screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point at the centre of the viewport
    pub offset: Vec2,
    /// Screen pixels per world unit, uniform in practice
    pub scale: Vec2,
    /// Viewport size in screen pixels
    pub size: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

impl Camera {
    pub fn new(size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            size,
        }
    }

    /// Current zoom factor
    pub fn zoom_factor(&self) -> f32 {
        self.scale.y
    }

    /// Set both axes to the quantized zoom, returning the applied value
    pub fn set_zoom(&mut self, zoom: f32, settings: &ZoomSettings) -> f32 {
        if zoom.is_nan() {
            return self.zoom_factor();
        }
        let zoom = settings.quantize(zoom);
        self.scale = Vec2::splat(zoom);
        zoom
    }

    /// Move the camera by a screen-space delta.
    ///
    /// The delta is divided by the current scale, so a drag of N pixels moves
    /// the view by the same on-screen distance at every zoom level.
    pub fn pan(&mut self, delta_screen: Vec2) {
        self.offset += delta_screen / self.scale;
    }

    /// Apply a wheel delta, returning the new zoom factor. Non-finite deltas
    /// leave the zoom unchanged.
    pub fn zoom(&mut self, wheel_delta_y: f32, settings: &ZoomSettings) -> f32 {
        if !wheel_delta_y.is_finite() {
            return self.zoom_factor();
        }
        let target = self.scale.y + wheel_delta_y * -settings.wheel_sensitivity;
        self.set_zoom(target, settings)
    }

    /// Adopt a new viewport size and re-centre the world origin in it
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.offset = Vec2::ZERO;
    }

    /// Size of the visible area in world units
    pub fn visible_size(&self) -> Vec2 {
        self.size / self.scale
    }

    /// Visible world rectangle as `(min, max)`
    pub fn visible_world_rect(&self) -> (Vec2, Vec2) {
        let half = self.visible_size() * 0.5;
        (self.offset - half, self.offset + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pan_is_divided_by_zoom() {
        let settings = ZoomSettings::default();
        let mut camera = Camera::new(Vec2::new(100.0, 100.0));
        camera.set_zoom(2.0, &settings);

        camera.pan(Vec2::new(10.0, -4.0));
        assert_eq!(camera.offset, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_wheel_zoom_steps_by_tenths() {
        let settings = ZoomSettings::default();
        let mut camera = Camera::default();

        // One browser wheel notch (100 units) toward the user zooms in by 0.1
        let zoom = camera.zoom(-100.0, &settings);
        assert!((zoom - 1.1).abs() < 1e-6);
        assert_eq!(camera.scale.x, camera.scale.y);

        let zoom = camera.zoom(100.0, &settings);
        assert!((zoom - 1.0).abs() < 1e-6);

        // Tiny deltas round away
        let zoom = camera.zoom(20.0, &settings);
        assert!((zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_always_clamped() {
        let settings = ZoomSettings::default();
        let mut camera = Camera::default();

        for _ in 0..100 {
            camera.zoom(-5000.0, &settings);
            assert!(camera.zoom_factor() <= 4.0);
        }
        assert_eq!(camera.zoom_factor(), 4.0);

        for _ in 0..100 {
            camera.zoom(12345.0, &settings);
            assert!(camera.zoom_factor() >= 0.5);
        }
        assert_eq!(camera.zoom_factor(), 0.5);
    }

    #[test]
    fn test_non_finite_wheel_delta_is_ignored() {
        let settings = ZoomSettings::default();
        let mut camera = Camera::default();
        camera.zoom(-300.0, &settings);

        for delta in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let zoom = camera.zoom(delta, &settings);
            assert!((zoom - 1.3).abs() < 1e-6);
        }
        assert!((camera.set_zoom(f32::NAN, &settings) - 1.3).abs() < 1e-6);
        assert_eq!(camera.scale.x, camera.scale.y);
        assert_eq!(settings.quantize(f32::NAN), 0.5);
    }

    proptest! {
        #[test]
        fn test_random_wheel_deltas_stay_in_bounds(
            deltas in prop::collection::vec(any::<f32>(), 0..200),
        ) {
            let settings = ZoomSettings::default();
            let mut camera = Camera::default();
            for delta in deltas {
                let zoom = camera.zoom(delta, &settings);
                prop_assert!((0.5..=4.0).contains(&zoom), "zoom {} out of range", zoom);
                prop_assert_eq!(camera.scale.x, camera.scale.y);
            }
        }
    }

    #[test]
    fn test_resize_recenters_origin() {
        let mut camera = Camera::default();
        camera.pan(Vec2::new(40.0, 40.0));
        camera.resize(Vec2::new(300.0, 200.0));

        assert_eq!(camera.offset, Vec2::ZERO);
        assert_eq!(camera.size, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_visible_world_rect() {
        let settings = ZoomSettings::default();
        let mut camera = Camera::new(Vec2::new(200.0, 100.0));
        camera.set_zoom(2.0, &settings);
        camera.offset = Vec2::new(10.0, 0.0);

        let (min, max) = camera.visible_world_rect();
        assert_eq!(min, Vec2::new(-40.0, -25.0));
        assert_eq!(max, Vec2::new(60.0, 25.0));
    }
}
