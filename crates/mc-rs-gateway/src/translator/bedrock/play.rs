use mc_rs_proto::bedrock::{ContainerId, Interact, InteractAction, MobEquipment, Text};
use mc_rs_proto::java::{Chat, SetCarriedItem};
use tracing::debug;

use crate::error::TranslateError;
use crate::session::Session;

pub(super) fn interact(session: &mut Session, packet: &Interact) -> Result<(), TranslateError> {
    match packet.action {
        InteractAction::MouseOverEntity => {
            let target = (packet.runtime_entity_id != 0).then_some(packet.runtime_entity_id);
            session.mouseover = target;
            let Some(runtime_id) = target else {
                return Ok(());
            };
            let (entities, ctx) = session.entity_parts();
            if let Some(entity) = entities.get_by_runtime_mut(runtime_id) {
                let base = entity.base_mut();
                base.update_interactive_tag();
                base.update_bedrock_metadata(ctx.upstream);
            }
        }
        InteractAction::StopRiding | InteractAction::LeaveVehicle => {
            let (entities, _) = session.entity_parts();
            if let Some(vehicle) = entities
                .get_by_runtime_mut(packet.runtime_entity_id)
                .and_then(|entity| entity.base_mut().vehicle.as_mut())
            {
                vehicle.set_client_controlled(false);
            }
        }
        InteractAction::OpenNpc | InteractAction::OpenInventory => {
            debug!("Ignoring {:?} from {}", packet.action, session.display_name());
        }
    }
    Ok(())
}

pub(super) fn text(session: &mut Session, packet: &Text) -> Result<(), TranslateError> {
    let message = packet.message.trim();
    if message.is_empty() {
        return Ok(());
    }
    session.send_downstream(Chat {
        message: message.to_string(),
    });
    Ok(())
}

pub(super) fn mob_equipment(
    session: &mut Session,
    packet: &MobEquipment,
) -> Result<(), TranslateError> {
    if packet.runtime_entity_id != session.player().runtime_id
        || packet.container_id != ContainerId::Inventory
    {
        return Ok(());
    }
    if !(0..9).contains(&packet.hotbar_slot) {
        return Err(TranslateError::Invalid(format!(
            "hotbar slot {} out of range",
            packet.hotbar_slot
        )));
    }
    session.send_downstream(SetCarriedItem {
        slot: packet.hotbar_slot as u8,
    });
    Ok(())
}
