//! Editor panels and widgets built on egui.
//!
//! The host owns the egui integration (renderer + event pump); these helpers
//! only emit UI. Enabled with the `editor` feature.

use crate::ecs::{Entity, EntityRef, World};
use crate::math::Transform;
use crate::parallax::{ParallaxCamera, ParallaxLayer};

/// Draw the parallax inspector panel: camera position, snapping, and every
/// layer's factor/origin as editable fields.
pub fn parallax_inspector(ctx: &egui::Context, world: &mut World) {
    egui::SidePanel::right("parallax_inspector")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Parallax");
            ui.separator();

            let cameras = world.entities_with::<ParallaxCamera>();
            let Some(&camera) = cameras.first() else {
                ui.label("No parallax camera in the world");
                return;
            };

            ui.label(format!("Camera: {}", display_name(world, camera)));

            if let Some(tf) = world.get_mut::<Transform>(camera) {
                ui.horizontal(|ui| {
                    ui.label("X:");
                    ui.add(egui::DragValue::new(&mut tf.translation.x).speed(1.0));
                    ui.label("Y:");
                    ui.add(egui::DragValue::new(&mut tf.translation.y).speed(1.0));
                });
            }

            if let Some(cam) = world.get_mut::<ParallaxCamera>(camera) {
                let mut snapping = cam.snap_step.is_some();
                ui.horizontal(|ui| {
                    ui.checkbox(&mut snapping, "Snap to grid");
                    if snapping {
                        let mut step = cam.snap_step.unwrap_or(1.0);
                        ui.add(egui::DragValue::new(&mut step).speed(0.1));
                        cam.snap_step = Some(step.max(0.0));
                    } else {
                        cam.snap_step = None;
                    }
                });
            }
            ui.separator();

            for entity in world.entities_with::<ParallaxLayer>() {
                let title = display_name(world, entity);
                if let Some(layer) = world.get_mut::<ParallaxLayer>(entity) {
                    egui::CollapsingHeader::new(title)
                        .default_open(true)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label("Factor");
                                ui.add(egui::DragValue::new(&mut layer.factor.x).speed(0.01).prefix("X: "));
                                ui.add(egui::DragValue::new(&mut layer.factor.y).speed(0.01).prefix("Y: "));
                            });
                            ui.horizontal(|ui| {
                                ui.label("Origin");
                                ui.add(egui::DragValue::new(&mut layer.origin.x).speed(1.0).prefix("X: "));
                                ui.add(egui::DragValue::new(&mut layer.origin.y).speed(1.0).prefix("Y: "));
                            });
                        });
                }
            }
        });
}

/// Draw a restricted entity-reference field.
///
/// Offers only the targets the reference's policy permits for `owner`, plus
/// a "(none)" entry. A stored target that no longer satisfies the policy —
/// despawned or re-parented — is flagged next to the box. Returns `true` if
/// the selection changed.
pub fn entity_ref_field(
    ui: &mut egui::Ui,
    world: &World,
    owner: Entity,
    label: &str,
    reference: &mut EntityRef,
) -> bool {
    let mut changed = false;
    let current = match reference.get() {
        Some(target) => display_name(world, target),
        None => "(none)".to_string(),
    };

    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt((label, owner.index()))
            .selected_text(current)
            .show_ui(ui, |ui| {
                if ui.selectable_label(reference.get().is_none(), "(none)").clicked() {
                    reference.clear();
                    changed = true;
                }
                for candidate in reference.candidates(world, owner) {
                    let selected = reference.get() == Some(candidate);
                    let name = display_name(world, candidate);
                    if ui.selectable_label(selected, name).clicked() {
                        changed |= reference.set(world, owner, candidate);
                    }
                }
            });
        if !reference.is_valid(world, owner) {
            ui.colored_label(egui::Color32::YELLOW, "⚠ invalid target");
        }
    });
    changed
}

fn display_name(world: &World, entity: Entity) -> String {
    match world.entity_name(entity) {
        Some(name) => format!("{} ({})", name, entity.index()),
        None => format!("Entity {}", entity.index()),
    }
}
