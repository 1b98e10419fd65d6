mod config;
mod menu;
mod world;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chest_form_core::{ChestForm, ChestFormManager, PacketOutcome, PlayerId, PlayerLocation};
use chest_form_proto::codec::{encode_packet, frame_sub_packet, split_sub_packet};
use chest_form_proto::packets::{
    id, ContainerClose, ItemStackRequest, StackAction, StackRequest, StackSlot,
};
use chest_form_proto::types::{Uuid, Vec3};
use config::DemoConfig;
use menu::Choice;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use world::SimulatedWorld;

/// Container id the client uses for the open chest window.
const LEVEL_ENTITY_CONTAINER: u8 = 7;
/// Container id of the cursor.
const CURSOR_CONTAINER: u8 = 58;

/// Scripted player behaviour, one step per form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ShowShop,
    WaitShop,
    WaitChoice,
    WaitConfirm,
    Done,
}

/// A sub-packet the simulated client sends, framed like a game batch entry.
fn client_packet(packet_id: u32, body: &[u8]) -> Bytes {
    frame_sub_packet(packet_id, body)
}

fn take_from(slot: usize) -> Bytes {
    let take = StackAction::Take {
        count: 1,
        src: StackSlot::new(LEVEL_ENTITY_CONTAINER, slot as u8, 0),
        dst: StackSlot::new(CURSOR_CONTAINER, 0, 0),
    };
    let packet = ItemStackRequest {
        requests: vec![StackRequest::new(-1, vec![take])],
    };
    client_packet(id::ITEM_STACK_REQUEST, &encode_packet(&packet))
}

fn close_window(window_id: u8) -> Bytes {
    let packet = ContainerClose {
        window_id,
        container_type: 0,
        server_initiated: false,
    };
    client_packet(id::CONTAINER_CLOSE, &encode_packet(&packet))
}

fn deliver(
    manager: &mut ChestFormManager,
    world: &mut SimulatedWorld,
    player: PlayerId,
    frame: Bytes,
) -> PacketOutcome {
    match split_sub_packet(frame) {
        Ok((packet_id, body)) => manager.handle_packet(player, packet_id, &body, world),
        Err(e) => {
            warn!("Bad frame from {player}: {e}");
            PacketOutcome::Ignored
        }
    }
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/chest-form.toml").into());
    let config = match DemoConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Chest form demo v{} starting", env!("CARGO_PKG_VERSION"));

    let player: PlayerId = Uuid::new(rand::random(), rand::random());
    let location = PlayerLocation::new(
        Vec3::new(config.player.x, config.player.y, config.player.z),
        config.player.dimension,
    );
    info!(
        "{} ({player}) standing at {} in {:?}",
        config.player.name, location.position, location.dimension
    );

    let (choice_tx, mut choice_rx) = mpsc::unbounded_channel::<Choice>();
    let (shop, confirm) = match (menu::shop(&choice_tx), menu::confirm(&choice_tx)) {
        (Ok(shop), Ok(confirm)) => (Arc::new(shop), Arc::new(confirm)),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to build forms: {e}");
            std::process::exit(1);
        }
    };

    let mut world = SimulatedWorld::new(player, location);
    let mut manager = ChestFormManager::new(config.form.clone());
    let mut step = Step::ShowShop;
    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                manager.tick(&mut world);
                step = advance(step, &mut manager, &mut world, player, &shop, &confirm);
                if step == Step::Done {
                    break;
                }
            }
            Some(choice) = choice_rx.recv() => {
                info!("Handler ran: {} chose {} at slot {}", choice.player, choice.label, choice.slot);
                if step == Step::WaitChoice {
                    present(&mut manager, &mut world, player, &confirm);
                    step = Step::WaitConfirm;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                manager.player_disconnected(player);
                break;
            }
        }
    }

    let ghosts = world.ghost_blocks();
    if ghosts.is_empty() {
        info!("Client view matches the world again");
    } else {
        warn!("Client still sees fake blocks at {ghosts:?}");
    }
    info!("Demo finished.");
}

fn present(
    manager: &mut ChestFormManager,
    world: &mut SimulatedWorld,
    player: PlayerId,
    form: &Arc<ChestForm>,
) {
    if manager.present(form, player, world).is_none() {
        error!("Could not present \"{}\"", form.title());
    }
}

/// Move the script forward once per tick.
fn advance(
    step: Step,
    manager: &mut ChestFormManager,
    world: &mut SimulatedWorld,
    player: PlayerId,
    shop: &Arc<ChestForm>,
    confirm: &Arc<ChestForm>,
) -> Step {
    match step {
        Step::ShowShop => {
            present(manager, world, player, shop);
            Step::WaitShop
        }
        Step::WaitShop if manager.is_presented(player) => {
            // A take on glass does nothing; the sword resolves the form.
            let outcome = deliver(manager, world, player, take_from(0));
            info!("Take on border: {outcome:?}");
            let outcome = deliver(manager, world, player, take_from(menu::SWORD_SLOT));
            info!("Take on sword: {outcome:?}");
            Step::WaitChoice
        }
        Step::WaitConfirm if manager.is_presented(player) => {
            let window = world.open_window().unwrap_or(manager.config().container_id);
            let outcome = deliver(manager, world, player, close_window(window));
            info!("Player closed the prompt: {outcome:?}");
            Step::Done
        }
        other => other,
    }
}
