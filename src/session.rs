//! Session: the explicit owner of all per-frame world state.
//!
//! One [`Session`] runs one frame at a time: poll the model load, step the
//! player, render the active layers and composite them. Nothing outside a
//! `frame` call mutates the world.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::core::{
    AsciiCompositor, CollisionIndex, CompositeFrame, MovementController, Obstacle,
    ObstacleScatterer, Orientation, PlayerKinematics, StepOutcome,
};
use crate::loader::{LoadStatus, ModelHandle, ModelLoader, PendingModel};
use crate::raster::{AsciiLayer, Camera, Layer, Raycaster, Scene};
use crate::term::{ColorDrift, Palette};
use crate::types::{
    InputState, MoveAction, RenderMode, Resizable, StyleTag, GROUND_RAMP, SINGLE_LAYER_RAMP,
    TREE_RAMP,
};

/// World and player state mutated by [`Session::frame`].
#[derive(Debug)]
pub struct FrameContext {
    pub kinematics: PlayerKinematics,
    pub orientation: Orientation,
    pub controller: MovementController,
    pub collisions: CollisionIndex,
    pub obstacles: Vec<Obstacle>,
    pub scene: Scene,
    pub camera: Camera,
}

impl FrameContext {
    fn new(area_size: f32) -> Self {
        let kinematics = PlayerKinematics::default();
        let orientation = Orientation::default();
        Self {
            kinematics,
            orientation,
            controller: MovementController::new(),
            collisions: CollisionIndex::new(),
            obstacles: Vec::new(),
            scene: Scene::new(area_size),
            camera: Camera::new(kinematics.position, orientation.yaw),
        }
    }
}

/// Where the tree model is in its lifecycle.
#[derive(Debug)]
pub enum ModelState {
    Loading(PendingModel),
    Ready(ModelHandle),
    /// Load failed; the world stays empty.
    Failed,
}

pub struct Session {
    config: ViewerConfig,
    ctx: FrameContext,
    loader: Option<ModelLoader>,
    model: ModelState,
    rng: StdRng,
    raycaster: Raycaster,
    ground: AsciiLayer,
    trees: AsciiLayer,
    single: AsciiLayer,
    compositor: AsciiCompositor,
    mode: RenderMode,
    palette: Palette,
    drift: ColorDrift,
    size: (u16, u16),
}

impl Session {
    /// Start a session and begin loading the configured model in the
    /// background. The world is empty until the load completes.
    pub fn init(config: ViewerConfig) -> Result<Self> {
        let loader = ModelLoader::new().context("failed to start model loader runtime")?;
        let pending = loader.load(config.model_path.clone());
        info!(
            model = %config.model_path.display(),
            trees = config.trees,
            area = config.area_size,
            mode = config.mode.as_str(),
            "session started"
        );
        Ok(Self::assemble(config, Some(loader), ModelState::Loading(pending)))
    }

    /// Start a session with an already loaded model. The world is populated
    /// immediately.
    pub fn with_model(config: ViewerConfig, model: ModelHandle) -> Self {
        let mut session = Self::assemble(config, None, ModelState::Failed);
        session.populate(&model);
        session.model = ModelState::Ready(model);
        session
    }

    fn assemble(config: ViewerConfig, loader: Option<ModelLoader>, model: ModelState) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ctx: FrameContext::new(config.area_size),
            loader,
            model,
            rng,
            raycaster: Raycaster,
            ground: AsciiLayer::new(Layer::Ground, GROUND_RAMP, false),
            trees: AsciiLayer::new(Layer::Trees, TREE_RAMP, false),
            single: AsciiLayer::new(Layer::All, SINGLE_LAYER_RAMP, true),
            compositor: AsciiCompositor::new(),
            mode: config.mode,
            palette: Palette::default(),
            drift: ColorDrift::new(),
            size: (0, 0),
            config,
        }
    }

    /// Stop the loader runtime. In-flight loads are abandoned.
    pub fn teardown(mut self) {
        if let Some(loader) = self.loader.take() {
            loader.shutdown();
        }
        info!(trees = self.ctx.obstacles.len(), "session ended");
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn model(&self) -> &ModelState {
        &self.model
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// True once the model load has finished, successfully or not.
    pub fn world_ready(&self) -> bool {
        !matches!(self.model, ModelState::Loading(_))
    }

    /// Grid size in cells (terminal size minus the status row).
    pub fn grid_size(&self) -> (u16, u16) {
        self.size
    }

    /// Output of the most recent frame.
    pub fn last_frame(&self) -> &CompositeFrame {
        self.compositor.last()
    }

    /// Palette for this frame, color drift applied.
    pub fn palette(&self) -> Palette {
        self.drift.apply(&self.palette)
    }

    /// Apply a toggle action. Movement actions are ignored.
    pub fn apply_toggle(&mut self, action: MoveAction) {
        match action {
            MoveAction::ToggleColors => {
                let on = self.drift.toggle();
                info!(enabled = on, "color drift toggled");
            }
            MoveAction::ToggleLayers => {
                self.mode = self.mode.toggled();
                info!(mode = self.mode.as_str(), "render mode toggled");
            }
            _ => {}
        }
    }

    /// Run one frame and return the output to present.
    ///
    /// When compositing fails the previous frame is returned again.
    pub fn frame(&mut self, input: &InputState, delta_seconds: f32) -> &CompositeFrame {
        self.poll_model();
        let outcome = self.step(input, delta_seconds);
        if outcome.collided {
            debug!(x = outcome.position.x, z = outcome.position.z, "move blocked");
        }
        self.drift.step(&mut self.rng);

        let ctx = &self.ctx;
        match self.mode {
            RenderMode::Layered => {
                let ground = self.ground.render(&self.raycaster, &ctx.scene, &ctx.camera);
                let trees = self.trees.render(&self.raycaster, &ctx.scene, &ctx.camera);
                if let Err(err) =
                    self.compositor
                        .composite(&ground, StyleTag::Ground, &trees, StyleTag::Tree)
                {
                    warn!(error = %err, "composite failed; keeping previous frame");
                }
            }
            RenderMode::Single => {
                let grid = self.single.render(&self.raycaster, &ctx.scene, &ctx.camera);
                self.compositor.present_single(&grid, StyleTag::Ground);
            }
        }
        self.compositor.last()
    }

    fn step(&mut self, input: &InputState, delta_seconds: f32) -> StepOutcome {
        let ctx = &mut self.ctx;
        let outcome = ctx.controller.step(
            input,
            delta_seconds,
            &mut ctx.kinematics,
            &mut ctx.orientation,
            &ctx.collisions,
        );
        ctx.camera.position = ctx.kinematics.position;
        ctx.camera.yaw = ctx.orientation.yaw;
        outcome
    }

    fn poll_model(&mut self) {
        let status = match &mut self.model {
            ModelState::Loading(pending) => pending.poll(),
            _ => return,
        };
        match status {
            LoadStatus::Pending => {}
            LoadStatus::Ready(model) => {
                self.populate(&model);
                self.model = ModelState::Ready(model);
            }
            LoadStatus::Failed(err) => {
                warn!(
                    path = %self.config.model_path.display(),
                    error = %err,
                    "model load failed; continuing without trees"
                );
                self.model = ModelState::Failed;
            }
        }
    }

    fn populate(&mut self, model: &ModelHandle) {
        let ctx = &mut self.ctx;
        let clearance = ctx.controller.player_box(ctx.kinematics.position);
        let scatterer = ObstacleScatterer::new(self.config.trees, self.config.area_size)
            .with_spawn_clearance(clearance);

        ctx.collisions.clear();
        ctx.obstacles = scatterer.populate(&mut self.rng, &mut ctx.collisions);
        ctx.scene.set_trees(model, &ctx.obstacles);
        info!(
            model = model.name(),
            requested = self.config.trees,
            placed = ctx.obstacles.len(),
            "world populated"
        );
    }

    /// One-line summary for the bottom terminal row.
    pub fn status_line(&self) -> String {
        let p = self.ctx.kinematics.position;
        let model = match &self.model {
            ModelState::Loading(_) => "loading",
            ModelState::Ready(m) => m.name(),
            ModelState::Failed => "no model",
        };
        format!(
            " x {:>7.1}  z {:>7.1}  yaw {:>6.2}  speed {:>4.1}  trees {}  {}  colors {}  model {}",
            p.x,
            p.z,
            self.ctx.orientation.yaw,
            self.ctx.kinematics.speed(),
            self.ctx.obstacles.len(),
            self.mode.as_str(),
            if self.drift.is_enabled() { "on" } else { "off" },
            model,
        )
    }
}

impl Resizable for Session {
    /// `rows` is the full terminal height; the last row holds the status line.
    fn resize(&mut self, cols: u16, rows: u16) {
        let grid_rows = rows.saturating_sub(1);
        self.size = (cols, grid_rows);
        dispatch_resize(
            &mut [
                &mut self.ground as &mut dyn Resizable,
                &mut self.trees,
                &mut self.single,
                &mut self.ctx.camera,
            ],
            cols,
            grid_rows,
        );
        debug!(cols, rows = grid_rows, "grid resized");
    }
}

/// Push a new size to every owner.
pub fn dispatch_resize(targets: &mut [&mut dyn Resizable], cols: u16, rows: u16) {
    for target in targets.iter_mut() {
        target.resize(cols, rows);
    }
}
