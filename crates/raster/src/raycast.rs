//! Software raycaster producing one text grid per scene layer.
//!
//! Every cell casts one ray through its center. A hit is shaded (ambient plus
//! Lambert, attenuated with distance) and mapped through the layer's ramp; a
//! miss leaves the cell as a space, which is the compositor's empty sentinel.

use glam::Vec3;

use crate::camera::{Camera, Ray};
use crate::core::{Aabb, TextGrid};
use crate::ramp::CharRamp;
use crate::scene::Scene;
use crate::types::Resizable;

/// Distance attenuation: brightness is divided by `1 + FOG * t`.
const FOG: f32 = 0.03;

/// Trees further than this are skipped.
const TREE_DRAW_DISTANCE: f32 = 80.0;

/// Which part of the scene a pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ground,
    Trees,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub normal: Vec3,
    pub albedo: f32,
}

/// Produces one layer of ASCII output.
pub trait LayerRenderer {
    fn render_layer(
        &self,
        scene: &Scene,
        layer: Layer,
        camera: &Camera,
        ramp: &CharRamp,
        invert: bool,
        width: u16,
        height: u16,
    ) -> TextGrid;
}

/// Slab test against an axis-aligned box.
///
/// Returns the entry distance and the face normal at entry. Rays starting
/// inside the box report no hit.
pub fn ray_box(ray: &Ray, inv_dir: Vec3, b: &Aabb, t_max: f32) -> Option<(f32, Vec3)> {
    let t1 = (b.min() - ray.origin) * inv_dir;
    let t2 = (b.max() - ray.origin) * inv_dir;
    let t_near = t1.min(t2);
    let t_far = t1.max(t2);

    let enter = t_near.max_element();
    let exit = t_far.min_element();
    if !(enter <= exit) || enter < 0.0 || enter > t_max {
        return None;
    }

    let normal = if enter == t_near.x {
        Vec3::new(-ray.dir.x.signum(), 0.0, 0.0)
    } else if enter == t_near.y {
        Vec3::new(0.0, -ray.dir.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, -ray.dir.z.signum())
    };
    Some((enter, normal))
}

fn ground_hit(scene: &Scene, ray: &Ray, near: f32, far: f32) -> Option<Hit> {
    if ray.dir.y >= 0.0 {
        return None;
    }
    let t = (scene.ground_y() - ray.origin.y) / ray.dir.y;
    if t < near || t > far {
        return None;
    }
    let p = ray.at(t);
    let half = scene.ground_half_size();
    if p.x.abs() > half || p.z.abs() > half {
        return None;
    }
    Some(Hit {
        t,
        normal: Vec3::Y,
        albedo: scene.ground_albedo(),
    })
}

fn tree_hit(scene: &Scene, visible: &[usize], ray: &Ray, near: f32, far: f32) -> Option<Hit> {
    let inv_dir = ray.dir.recip();
    let mut best: Option<Hit> = None;

    for &i in visible {
        let tree = &scene.trees()[i];
        let limit = best.map_or(far, |h| h.t);
        if ray_box(ray, inv_dir, tree.bounds(), limit).is_none()
            && !tree.bounds().contains_point(ray.origin)
        {
            continue;
        }
        for part in tree.parts() {
            let limit = best.map_or(far, |h| h.t);
            if let Some((t, normal)) = ray_box(ray, inv_dir, &part.bounds, limit) {
                if t >= near {
                    best = Some(Hit {
                        t,
                        normal,
                        albedo: part.albedo,
                    });
                }
            }
        }
    }
    best
}

/// Indices of trees close enough and not behind the camera.
fn visible_trees(scene: &Scene, camera: &Camera) -> Vec<usize> {
    let forward = camera.forward();
    scene
        .trees()
        .iter()
        .enumerate()
        .filter(|(_, tree)| {
            let b = tree.bounds();
            let to_center = b.center() - camera.position;
            let radius = b.size().length() * 0.5;
            to_center.length() - radius <= TREE_DRAW_DISTANCE && to_center.dot(forward) >= -radius
        })
        .map(|(i, _)| i)
        .collect()
}

/// Nearest hit for `layer` along `ray`.
fn trace(scene: &Scene, layer: Layer, visible: &[usize], ray: &Ray, camera: &Camera) -> Option<Hit> {
    let (near, far) = (camera.near(), camera.far());
    match layer {
        Layer::Ground => ground_hit(scene, ray, near, far),
        Layer::Trees => tree_hit(scene, visible, ray, near, far),
        Layer::All => {
            let ground = ground_hit(scene, ray, near, far);
            let far = ground.map_or(far, |h| h.t);
            tree_hit(scene, visible, ray, near, far).or(ground)
        }
    }
}

/// The default [`LayerRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Raycaster;

impl LayerRenderer for Raycaster {
    fn render_layer(
        &self,
        scene: &Scene,
        layer: Layer,
        camera: &Camera,
        ramp: &CharRamp,
        invert: bool,
        width: u16,
        height: u16,
    ) -> TextGrid {
        let visible = match layer {
            Layer::Ground => Vec::new(),
            Layer::Trees | Layer::All => visible_trees(scene, camera),
        };

        let mut grid = TextGrid::default();
        for row in 0..height {
            let mut line = String::with_capacity(width as usize);
            for col in 0..width {
                let ray = camera.ray(col, row, width, height);
                let ch = match trace(scene, layer, &visible, &ray, camera) {
                    Some(hit) => {
                        let lit = scene.shade(hit.normal, hit.albedo) / (1.0 + FOG * hit.t);
                        ramp.visible_glyph(lit, invert)
                    }
                    None => ' ',
                };
                line.push(ch);
            }
            grid.push_row(line);
        }
        grid
    }
}

/// One ASCII pass: a layer, its ramp and its own grid size.
#[derive(Debug, Clone)]
pub struct AsciiLayer {
    layer: Layer,
    ramp: CharRamp,
    invert: bool,
    cols: u16,
    rows: u16,
}

impl AsciiLayer {
    pub fn new(layer: Layer, ramp: &str, invert: bool) -> Self {
        Self {
            layer,
            ramp: CharRamp::new(ramp),
            invert,
            cols: 0,
            rows: 0,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn render(
        &self,
        renderer: &impl LayerRenderer,
        scene: &Scene,
        camera: &Camera,
    ) -> TextGrid {
        renderer.render_layer(
            scene,
            self.layer,
            camera,
            &self.ramp,
            self.invert,
            self.cols,
            self.rows,
        )
    }
}

impl Resizable for AsciiLayer {
    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Obstacle;
    use crate::loader::{ModelDescription, ModelHandle, ModelPart};

    fn slab_model() -> ModelHandle {
        ModelHandle::new(ModelDescription {
            name: "slab".into(),
            parts: vec![ModelPart {
                min: [-5.0, 0.0, -5.0],
                max: [5.0, 20.0, 5.0],
                albedo: 1.0,
            }],
        })
    }

    fn scene_with_tree_ahead() -> Scene {
        let mut scene = Scene::new(100.0);
        scene.set_trees(&slab_model(), &[Obstacle::new(Vec3::new(0.0, -1.0, -10.0), 1.0)]);
        scene
    }

    #[test]
    fn ray_box_reports_entry_face() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0));
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        let (t, n) = ray_box(&ray, ray.dir.recip(), &b, 100.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(n, Vec3::Z);

        assert!(ray_box(&ray, ray.dir.recip(), &b, 3.0).is_none());
        let away = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::Z,
        };
        assert!(ray_box(&away, away.dir.recip(), &b, 100.0).is_none());
    }

    #[test]
    fn ground_layer_fills_lower_half_only() {
        let scene = Scene::new(100.0);
        let camera = Camera::default();
        let ramp = CharRamp::new(" .:-=+*#%@");
        let grid = Raycaster.render_layer(&scene, Layer::Ground, &camera, &ramp, false, 16, 8);

        assert_eq!(grid.height(), 8);
        assert_eq!(grid.width(), 16);
        assert!(grid.rows()[0].chars().all(|c| c == ' '));
        assert!(grid.rows()[7].chars().all(|c| c != ' '));
    }

    #[test]
    fn tree_layer_is_blank_without_trees() {
        let scene = Scene::new(100.0);
        let grid = Raycaster.render_layer(
            &scene,
            Layer::Trees,
            &Camera::default(),
            &CharRamp::new(" ░▒▓█"),
            false,
            12,
            6,
        );
        assert_eq!(grid, TextGrid::blank(12, 6));
    }

    #[test]
    fn tree_ahead_covers_center_cell() {
        let scene = scene_with_tree_ahead();
        let grid = Raycaster.render_layer(
            &scene,
            Layer::Trees,
            &Camera::default(),
            &CharRamp::new(" ░▒▓█"),
            false,
            9,
            9,
        );
        let center = grid.rows()[4].chars().nth(4).unwrap();
        assert_ne!(center, ' ');
    }

    #[test]
    fn tree_behind_camera_is_not_drawn() {
        let scene = scene_with_tree_ahead();
        let camera = Camera::new(Vec3::ZERO, std::f32::consts::PI);
        let grid = Raycaster.render_layer(
            &scene,
            Layer::Trees,
            &camera,
            &CharRamp::new(" ░▒▓█"),
            false,
            9,
            9,
        );
        assert_eq!(grid, TextGrid::blank(9, 9));
    }

    #[test]
    fn ascii_layer_uses_its_own_size() {
        let mut pass = AsciiLayer::new(Layer::Ground, " .:", false);
        pass.resize(20, 10);
        let grid = pass.render(&Raycaster, &Scene::new(100.0), &Camera::default());
        assert_eq!((grid.width(), grid.height()), (20, 10));
        assert_eq!(pass.size(), (20, 10));
    }
}
