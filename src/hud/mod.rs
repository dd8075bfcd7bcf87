use bevy::prelude::*;
use bevy_egui::{EguiContext, egui};

use crate::core::CameraCycle;
use crate::loading::{LoadPhase, LoadProgress};

/// Frames to wait before drawing, egui needs a few to set up its context.
const EGUI_WARMUP_FRAMES: u32 = 5;

pub struct HudPlugin;

/// Frames seen since startup, saturating at the warmup count.
#[derive(Resource, Default)]
struct EguiReady(u32);

impl Plugin for HudPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }
    app.init_resource::<EguiReady>().add_systems(
      Update,
      (
        count_warmup_frames,
        (
          draw_load_progress.run_if(in_state(LoadPhase::Loading)),
          draw_camera_button,
        )
          .run_if(egui_ready),
      )
        .chain(),
    );
  }
}

fn count_warmup_frames(mut ready: ResMut<EguiReady>) {
  if ready.0 < EGUI_WARMUP_FRAMES {
    ready.0 += 1;
  }
}

fn egui_ready(ready: Res<EguiReady>) -> bool {
  ready.0 >= EGUI_WARMUP_FRAMES
}

fn draw_load_progress(mut egui_ctx: Query<&mut EguiContext>, progress: Res<LoadProgress>) {
  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();

  egui::Area::new(egui::Id::new("load_progress"))
    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
    .interactable(false)
    .show(ctx, |ui| {
      ui.add(
        egui::ProgressBar::new(progress.0)
          .desired_width(240.0)
          .show_percentage(),
      );
    });
}

/// Cycles the camera-view counter. The orbit camera ignores it.
fn draw_camera_button(mut egui_ctx: Query<&mut EguiContext>, mut cycle: ResMut<CameraCycle>) {
  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();

  egui::Area::new(egui::Id::new("camera_button"))
    .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
    .show(ctx, |ui| {
      if ui.button("Camera").clicked() {
        cycle.advance();
        info!("Camera view {}", cycle.view());
      }
    });
}
