//! Drives chest forms: presents them, watches the player's inbound packets
//! and runs slot handlers once the fake chest is gone.

use std::sync::Arc;

use chest_form_proto::codec::ProtoDecode;
use chest_form_proto::packets::{id, ContainerClose, ItemStackRequest, StackAction};
use chest_form_proto::types::BlockPos;
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::form::ChestForm;
use crate::host::{FormHost, PlayerId};
use crate::presenter;
use crate::registry::{PresentedForm, SessionRegistry};
use crate::scheduler::{DeferredTask, TickScheduler};

/// Items the client only knows from a BlockActorData packet never got a
/// stack network id from the server.
const VIRTUAL_STACK_NETWORK_ID: i32 = 0;

/// What [`ChestFormManager::handle_packet`] did with a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketOutcome {
    /// The player has no presented form, or the packet is of no interest.
    Ignored,
    /// A form is presented but the packet did not resolve it.
    NoMatch,
    /// A clickable slot was taken. Its handler is scheduled.
    Clicked { slot: usize },
    /// The player closed the form without choosing.
    Closed,
}

#[derive(Debug, Default)]
pub struct ChestFormManager {
    config: FormConfig,
    registry: SessionRegistry,
    scheduler: TickScheduler,
}

impl ChestFormManager {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            registry: SessionRegistry::new(),
            scheduler: TickScheduler::new(),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Show `form` to `player`. The chest blocks go out now; the window opens
    /// `open_delay_ticks` later. Returns the anchor, or `None` if the host
    /// does not know where the player is.
    pub fn present(
        &mut self,
        form: &Arc<ChestForm>,
        player: PlayerId,
        host: &mut dyn FormHost,
    ) -> Option<BlockPos> {
        let Some(location) = host.player_location(player) else {
            warn!("Cannot present \"{}\" to {player}: location unknown", form.title());
            return None;
        };

        let anchor = presenter::anchor_for(&location, &self.config);
        let presented = PresentedForm {
            form: Arc::clone(form),
            anchor,
            dimension: location.dimension,
        };
        presenter::send_chest_blocks(host, &self.config, player, &presented);
        debug!(
            "Presenting \"{}\" to {player} at {anchor} ({:?})",
            form.title(),
            location.dimension
        );

        self.scheduler.schedule(
            self.config.open_delay_ticks,
            DeferredTask::OpenContainer { player, presented },
        );
        Some(anchor)
    }

    /// Inspect an inbound packet from `player`.
    pub fn handle_packet(
        &mut self,
        player: PlayerId,
        packet_id: u32,
        payload: &[u8],
        host: &mut dyn FormHost,
    ) -> PacketOutcome {
        if !self.registry.contains(&player) {
            return PacketOutcome::Ignored;
        }
        match packet_id {
            id::ITEM_STACK_REQUEST => self.handle_item_stack_request(player, payload, host),
            id::CONTAINER_CLOSE => self.handle_container_close(player, payload, host),
            _ => PacketOutcome::Ignored,
        }
    }

    fn handle_item_stack_request(
        &mut self,
        player: PlayerId,
        mut payload: &[u8],
        host: &mut dyn FormHost,
    ) -> PacketOutcome {
        let request = match ItemStackRequest::proto_decode(&mut payload) {
            Ok(r) => r,
            Err(e) => {
                debug!("Bad ItemStackRequest from {player}: {e}");
                return PacketOutcome::NoMatch;
            }
        };

        let Some(presented) = self.registry.get(&player) else {
            return PacketOutcome::Ignored;
        };
        let form = &presented.form;
        let clicked = request.actions().find_map(|action| match action {
            StackAction::Take { src, .. }
                if src.stack_network_id == VIRTUAL_STACK_NETWORK_ID
                    && form.has_handler(src.slot as usize) =>
            {
                Some(src.slot as usize)
            }
            _ => None,
        });
        let Some(slot) = clicked else {
            return PacketOutcome::NoMatch;
        };
        let Some(presented) = self.registry.remove(&player) else {
            return PacketOutcome::NoMatch;
        };

        presenter::send_container_close(host, &self.config, player);
        presenter::revert(host, &self.config, player, &presented, true);
        debug!("{player} clicked slot {slot} of \"{}\"", presented.form.title());

        self.scheduler.schedule(
            self.config.callback_delay_ticks,
            DeferredTask::InvokeCallback {
                player,
                form: presented.form,
                slot,
            },
        );
        PacketOutcome::Clicked { slot }
    }

    fn handle_container_close(
        &mut self,
        player: PlayerId,
        mut payload: &[u8],
        host: &mut dyn FormHost,
    ) -> PacketOutcome {
        let close = match ContainerClose::proto_decode(&mut payload) {
            Ok(c) => c,
            Err(e) => {
                debug!("Bad ContainerClose from {player}: {e}");
                return PacketOutcome::NoMatch;
            }
        };
        if close.window_id != self.config.container_id {
            return PacketOutcome::NoMatch;
        }
        let Some(presented) = self.registry.remove(&player) else {
            return PacketOutcome::NoMatch;
        };

        presenter::revert(host, &self.config, player, &presented, true);
        debug!("{player} closed \"{}\"", presented.form.title());
        PacketOutcome::Closed
    }

    /// Advance one game tick: open due windows and run due handlers.
    pub fn tick(&mut self, host: &mut dyn FormHost) {
        for task in self.scheduler.tick() {
            match task {
                DeferredTask::OpenContainer { player, presented } => {
                    presenter::send_container_open(host, &self.config, player, presented.anchor);
                    let (anchor, dimension) = (presented.anchor, presented.dimension);
                    if let Some(previous) = self.registry.insert(player, presented) {
                        debug!(
                            "\"{}\" replaced by a newer form for {player}",
                            previous.form.title()
                        );
                        // The newer chest already covers the same position.
                        if previous.anchor != anchor || previous.dimension != dimension {
                            presenter::revert(host, &self.config, player, &previous, true);
                        }
                    }
                }
                DeferredTask::InvokeCallback { player, form, slot } => match form.handler(slot) {
                    Some(handler) => handler.invoke(player, slot),
                    None => debug!("Slot {slot} of \"{}\" lost its handler", form.title()),
                },
            }
        }
    }

    /// Forget everything about `player`. Nothing is sent: the client is gone.
    pub fn player_disconnected(&mut self, player: PlayerId) {
        let had_form = self.registry.remove(&player).is_some();
        let dropped = self.scheduler.cancel(|task| {
            matches!(task, DeferredTask::OpenContainer { player: p, .. } if *p == player)
        });
        if had_form || dropped > 0 {
            debug!("Dropped form state for disconnected {player}");
        }
    }

    pub fn is_presented(&self, player: PlayerId) -> bool {
        self.registry.contains(&player)
    }

    pub fn presented(&self, player: PlayerId) -> Option<&PresentedForm> {
        self.registry.get(&player)
    }

    pub fn presented_count(&self) -> usize {
        self.registry.len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chest_form_nbt::{read_nbt_network, NbtTag};
    use chest_form_proto::codec::{encode_packet, ProtoEncode};
    use chest_form_proto::packets::{
        BlockActorData, ContainerOpen, StackRequest, StackSlot, UpdateBlock,
    };
    use chest_form_proto::types::Uuid;

    use super::*;
    use crate::form::ChestLayout;
    use crate::host::Dimension;
    use crate::item::SlotItem;
    use crate::testing::{RecordingHost, AIR_RUNTIME_ID};

    type Clicks = Arc<Mutex<Vec<(PlayerId, usize)>>>;

    const P: PlayerId = Uuid {
        most_significant: 0xAA,
        least_significant: 0x01,
    };
    const Q: PlayerId = Uuid {
        most_significant: 0xBB,
        least_significant: 0x02,
    };

    fn recorder() -> (Clicks, impl Fn(PlayerId, usize) + Send + Sync + 'static) {
        let clicks: Clicks = Arc::default();
        let sink = Arc::clone(&clicks);
        (clicks, move |player, slot| {
            sink.lock().unwrap().push((player, slot));
        })
    }

    fn diamond_form(cb: impl Fn(PlayerId, usize) + Send + Sync + 'static) -> Arc<ChestForm> {
        let mut form = ChestForm::new("Treasure", ChestLayout::Double);
        form.fill_all(SlotItem::new("minecraft:air"));
        form.set_button(10, SlotItem::new("minecraft:diamond").amount(5), cb)
            .unwrap();
        Arc::new(form)
    }

    fn take(slot: u8, stack_network_id: i32) -> StackAction {
        StackAction::Take {
            count: 1,
            src: StackSlot::new(7, slot, stack_network_id),
            dst: StackSlot::new(58, 0, 0),
        }
    }

    fn request(actions: Vec<StackAction>) -> Vec<u8> {
        let packet = ItemStackRequest {
            requests: vec![StackRequest::new(-1, actions)],
        };
        encode_packet(&packet).to_vec()
    }

    fn close(window_id: u8) -> Vec<u8> {
        let packet = ContainerClose {
            window_id,
            container_type: 0,
            server_initiated: false,
        };
        encode_packet(&packet).to_vec()
    }

    fn click(
        manager: &mut ChestFormManager,
        host: &mut RecordingHost,
        player: PlayerId,
        action: StackAction,
    ) -> PacketOutcome {
        manager.handle_packet(player, id::ITEM_STACK_REQUEST, &request(vec![action]), host)
    }

    fn run_ticks(manager: &mut ChestFormManager, host: &mut RecordingHost, n: u64) {
        for _ in 0..n {
            manager.tick(host);
        }
    }

    /// Host with P standing at (0, 64, 0) and real blocks under the anchor.
    fn world() -> RecordingHost {
        let mut host = RecordingHost::new();
        host.place_player(P, 0.5, 64.0, 0.5, Dimension::Overworld);
        host.place_player(Q, 100.5, 64.0, 100.5, Dimension::Overworld);
        host.set_block(Dimension::Overworld, BlockPos::new(0, 68, 0), 1111);
        host.set_block(Dimension::Overworld, BlockPos::new(1, 68, 0), 2222);
        host
    }

    /// Present and wait out the open delay.
    fn opened(manager: &mut ChestFormManager, host: &mut RecordingHost, form: &Arc<ChestForm>) {
        manager.present(form, P, host).unwrap();
        let delay = manager.config().open_delay_ticks;
        run_ticks(manager, host, delay);
        assert!(manager.is_presented(P));
        host.clear_sent();
    }

    #[test]
    fn present_sends_blocks_then_opens_after_delay() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();

        let anchor = manager.present(&form, P, &mut host).unwrap();
        assert_eq!(anchor, BlockPos::new(0, 68, 0));
        assert_eq!(
            host.sent_ids(P),
            vec![id::UPDATE_BLOCK, id::UPDATE_BLOCK, id::BLOCK_ACTOR_DATA, id::BLOCK_ACTOR_DATA]
        );
        assert!(!manager.is_presented(P));

        let mut items = Vec::new();
        for i in 2..4 {
            let actor: BlockActorData = host.decode(P, i);
            let root = read_nbt_network(&mut actor.nbt_data.as_slice()).unwrap();
            items.extend(root.compound["Items"].as_list().unwrap().to_vec());
        }
        assert_eq!(items.len(), 54);
        for (i, item) in items.iter().enumerate() {
            let item = item.as_compound().unwrap();
            if i == 10 {
                assert_eq!(item["Count"], NbtTag::Byte(5));
                assert_eq!(item["Damage"], NbtTag::Short(0));
                assert_eq!(item["Name"].as_string(), Some("minecraft:diamond"));
                assert_eq!(item["Slot"], NbtTag::Byte(10));
            } else {
                assert!(item.is_empty(), "slot {i} should be empty");
            }
        }

        run_ticks(&mut manager, &mut host, 9);
        assert!(!manager.is_presented(P));
        assert_eq!(host.sent_ids(P).len(), 4);

        manager.tick(&mut host);
        assert!(manager.is_presented(P));
        assert_eq!(host.sent_ids(P).last(), Some(&id::CONTAINER_OPEN));
        let open: ContainerOpen = host.decode(P, 4);
        assert_eq!(open.window_id, 114);
        assert_eq!(open.position, anchor);
    }

    #[test]
    fn unknown_player_is_not_presented() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = RecordingHost::new();
        let mut manager = ChestFormManager::default();
        assert!(manager.present(&form, P, &mut host).is_none());
        assert_eq!(host.total_sent(), 0);
        assert_eq!(manager.pending_tasks(), 0);
    }

    #[test]
    fn click_closes_reverts_then_calls_back() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = click(&mut manager, &mut host, P, take(10, 0));
        assert_eq!(outcome, PacketOutcome::Clicked { slot: 10 });
        assert!(!manager.is_presented(P));
        assert_eq!(
            host.sent_ids(P),
            vec![id::CONTAINER_CLOSE, id::UPDATE_BLOCK, id::UPDATE_BLOCK]
        );

        let close: ContainerClose = host.decode(P, 0);
        assert_eq!(close.window_id, 114);
        assert_eq!(close.container_type, 0);
        assert!(close.server_initiated);
        let first: UpdateBlock = host.decode(P, 1);
        let second: UpdateBlock = host.decode(P, 2);
        assert_eq!(first.runtime_id, 1111);
        assert_eq!(second.runtime_id, 2222);
        assert_eq!(second.position, BlockPos::new(1, 68, 0));

        manager.tick(&mut host);
        assert!(clicks.lock().unwrap().is_empty());
        manager.tick(&mut host);
        assert_eq!(*clicks.lock().unwrap(), vec![(P, 10)]);
    }

    #[test]
    fn take_with_server_stack_id_is_ignored() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = click(&mut manager, &mut host, P, take(10, 3));
        assert_eq!(outcome, PacketOutcome::NoMatch);
        assert!(manager.is_presented(P));
        assert_eq!(host.total_sent(), 0);
        run_ticks(&mut manager, &mut host, 5);
        assert!(clicks.lock().unwrap().is_empty());
    }

    #[test]
    fn take_on_plain_slot_is_ignored() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = click(&mut manager, &mut host, P, take(11, 0));
        assert_eq!(outcome, PacketOutcome::NoMatch);
        assert!(manager.is_presented(P));
    }

    #[test]
    fn first_matching_action_wins() {
        let (clicks, cb) = recorder();
        let mut form = ChestForm::new("Menu", ChestLayout::Single);
        let shared = Arc::new(cb);
        let a = Arc::clone(&shared);
        let b = Arc::clone(&shared);
        form.set_button(3, SlotItem::new("apple"), move |p, s| (*a)(p, s)).unwrap();
        form.set_button(5, SlotItem::new("bread"), move |p, s| (*b)(p, s)).unwrap();
        let form = Arc::new(form);

        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let payload = request(vec![take(4, 0), take(5, 0), take(3, 0)]);
        let outcome = manager.handle_packet(P, id::ITEM_STACK_REQUEST, &payload, &mut host);
        assert_eq!(outcome, PacketOutcome::Clicked { slot: 5 });
        assert_eq!(host.sent_ids(P).len(), 2);
        run_ticks(&mut manager, &mut host, 2);
        assert_eq!(*clicks.lock().unwrap(), vec![(P, 5)]);
    }

    #[test]
    fn second_click_after_teardown_is_ignored() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let payload = request(vec![take(10, 0)]);
        manager.handle_packet(P, id::ITEM_STACK_REQUEST, &payload, &mut host);
        let again = manager.handle_packet(P, id::ITEM_STACK_REQUEST, &payload, &mut host);
        assert_eq!(again, PacketOutcome::Ignored);
        run_ticks(&mut manager, &mut host, 2);
        assert_eq!(clicks.lock().unwrap().len(), 1);
    }

    #[test]
    fn close_reverts_without_callback() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = manager.handle_packet(P, id::CONTAINER_CLOSE, &close(114), &mut host);
        assert_eq!(outcome, PacketOutcome::Closed);
        assert!(!manager.is_presented(P));
        assert_eq!(host.sent_ids(P), vec![id::UPDATE_BLOCK, id::UPDATE_BLOCK]);
        let first: UpdateBlock = host.decode(P, 0);
        assert_eq!(first.runtime_id, 1111);

        run_ticks(&mut manager, &mut host, 5);
        assert!(clicks.lock().unwrap().is_empty());
    }

    #[test]
    fn close_of_other_window_is_no_match() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = manager.handle_packet(P, id::CONTAINER_CLOSE, &close(3), &mut host);
        assert_eq!(outcome, PacketOutcome::NoMatch);
        assert!(manager.is_presented(P));
        assert_eq!(host.total_sent(), 0);
    }

    #[test]
    fn packets_without_form_are_ignored() {
        let mut host = world();
        let mut manager = ChestFormManager::default();
        let outcome = click(&mut manager, &mut host, P, take(10, 0));
        assert_eq!(outcome, PacketOutcome::Ignored);
        let outcome = manager.handle_packet(P, id::CONTAINER_CLOSE, &close(114), &mut host);
        assert_eq!(outcome, PacketOutcome::Ignored);
        assert_eq!(host.total_sent(), 0);
    }

    #[test]
    fn malformed_request_is_no_match() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = manager.handle_packet(P, id::ITEM_STACK_REQUEST, &[0x05], &mut host);
        assert_eq!(outcome, PacketOutcome::NoMatch);
        assert!(manager.is_presented(P));
    }

    #[test]
    fn unrelated_packet_is_ignored() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let mut body = Vec::new();
        UpdateBlock::new(BlockPos::new(0, 0, 0), 1).proto_encode(&mut body);
        let outcome = manager.handle_packet(P, id::UPDATE_BLOCK, &body, &mut host);
        assert_eq!(outcome, PacketOutcome::Ignored);
        assert!(manager.is_presented(P));
    }

    #[test]
    fn players_are_independent() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();

        let anchor_p = manager.present(&form, P, &mut host).unwrap();
        let anchor_q = manager.present(&form, Q, &mut host).unwrap();
        assert_ne!(anchor_p, anchor_q);
        run_ticks(&mut manager, &mut host, 10);
        assert_eq!(manager.presented_count(), 2);

        click(&mut manager, &mut host, Q, take(10, 0));
        assert!(manager.is_presented(P));
        assert!(!manager.is_presented(Q));

        let reverted: UpdateBlock = host.decode(Q, 6);
        assert_eq!(reverted.position, anchor_q);
        assert_eq!(reverted.runtime_id, AIR_RUNTIME_ID);

        run_ticks(&mut manager, &mut host, 2);
        assert_eq!(*clicks.lock().unwrap(), vec![(Q, 10)]);
    }

    #[test]
    fn presenting_again_replaces_entry() {
        let (_, cb) = recorder();
        let first = diamond_form(cb);
        let second = Arc::new(ChestForm::new("Other", ChestLayout::Single));
        let mut host = world();
        let mut manager = ChestFormManager::default();

        opened(&mut manager, &mut host, &first);
        manager.present(&second, P, &mut host).unwrap();
        run_ticks(&mut manager, &mut host, 10);
        assert_eq!(manager.presented_count(), 1);
        assert_eq!(manager.presented(P).unwrap().form.title(), "Other");
    }

    #[test]
    fn replaced_form_elsewhere_is_reverted() {
        let (_, cb) = recorder();
        let first = diamond_form(cb);
        let second = Arc::new(ChestForm::new("Other", ChestLayout::Single));
        let mut host = world();
        let mut manager = ChestFormManager::default();

        opened(&mut manager, &mut host, &first);
        host.place_player(P, 20.5, 64.0, 0.5, Dimension::Overworld);
        let anchor = manager.present(&second, P, &mut host).unwrap();
        assert_eq!(anchor, BlockPos::new(20, 68, 0));
        host.clear_sent();
        run_ticks(&mut manager, &mut host, 10);

        assert_eq!(
            host.sent_ids(P),
            vec![id::CONTAINER_OPEN, id::UPDATE_BLOCK, id::UPDATE_BLOCK]
        );
        let first_block: UpdateBlock = host.decode(P, 1);
        let second_block: UpdateBlock = host.decode(P, 2);
        assert_eq!(first_block.position, BlockPos::new(0, 68, 0));
        assert_eq!(first_block.runtime_id, 1111);
        assert_eq!(second_block.position, BlockPos::new(1, 68, 0));
        assert_eq!(second_block.runtime_id, 2222);
        assert_eq!(manager.presented(P).unwrap().form.title(), "Other");
    }

    #[test]
    fn replaced_form_in_place_is_not_reverted() {
        let (_, cb) = recorder();
        let first = diamond_form(cb);
        let second = Arc::new(ChestForm::new("Other", ChestLayout::Double));
        let mut host = world();
        let mut manager = ChestFormManager::default();

        opened(&mut manager, &mut host, &first);
        manager.present(&second, P, &mut host).unwrap();
        host.clear_sent();
        run_ticks(&mut manager, &mut host, 10);
        assert_eq!(host.sent_ids(P), vec![id::CONTAINER_OPEN]);
    }

    #[test]
    fn every_slot_reaches_its_chest() {
        let mut form = ChestForm::new("Grid", ChestLayout::Double);
        for slot in 0..54 {
            let item = SlotItem::new("minecraft:paper")
                .amount(slot as u8 + 1)
                .data(slot as u16 * 2);
            form.set_slot(slot, item, None).unwrap();
        }
        let form = Arc::new(form);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        manager.present(&form, P, &mut host).unwrap();

        let mut items = Vec::new();
        for i in 2..4 {
            let actor: BlockActorData = host.decode(P, i);
            let root = read_nbt_network(&mut actor.nbt_data.as_slice()).unwrap();
            items.extend(root.compound["Items"].as_list().unwrap().to_vec());
        }
        assert_eq!(items.len(), 54);
        for (i, item) in items.iter().enumerate() {
            let item = item.as_compound().unwrap();
            assert_eq!(item["Count"], NbtTag::Byte(i as i8 + 1), "slot {i}");
            assert_eq!(item["Damage"], NbtTag::Short(i as i16 * 2), "slot {i}");
            assert_eq!(item["Name"].as_string(), Some("minecraft:paper"), "slot {i}");
            assert_eq!(item["Slot"], NbtTag::Byte((i % 27) as i8), "slot {i}");
        }
    }

    #[test]
    fn click_in_second_chest() {
        let (clicks, cb) = recorder();
        let mut form = ChestForm::new("Big", ChestLayout::Double);
        form.set_button(40, SlotItem::new("emerald"), cb).unwrap();
        let form = Arc::new(form);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        let outcome = click(&mut manager, &mut host, P, take(40, 0));
        assert_eq!(outcome, PacketOutcome::Clicked { slot: 40 });
        assert!(!manager.is_presented(P));
        run_ticks(&mut manager, &mut host, 2);
        assert_eq!(*clicks.lock().unwrap(), vec![(P, 40)]);
    }

    #[test]
    fn callback_survives_disconnect() {
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        click(&mut manager, &mut host, P, take(10, 0));
        manager.player_disconnected(P);
        run_ticks(&mut manager, &mut host, 2);
        assert_eq!(*clicks.lock().unwrap(), vec![(P, 10)]);
    }

    #[test]
    fn disconnect_before_open_cancels_it() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();

        manager.present(&form, P, &mut host).unwrap();
        host.clear_sent();
        manager.player_disconnected(P);
        assert_eq!(manager.pending_tasks(), 0);
        run_ticks(&mut manager, &mut host, 10);
        assert!(!manager.is_presented(P));
        assert_eq!(host.total_sent(), 0);
    }

    #[test]
    fn disconnect_sends_nothing() {
        let (_, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::default();
        opened(&mut manager, &mut host, &form);

        manager.player_disconnected(P);
        assert!(!manager.is_presented(P));
        assert_eq!(host.total_sent(), 0);
    }

    #[test]
    fn custom_delays() {
        let config = FormConfig {
            open_delay_ticks: 1,
            callback_delay_ticks: 0,
            ..FormConfig::default()
        };
        let (clicks, cb) = recorder();
        let form = diamond_form(cb);
        let mut host = world();
        let mut manager = ChestFormManager::new(config);

        manager.present(&form, P, &mut host).unwrap();
        manager.tick(&mut host);
        assert!(manager.is_presented(P));

        click(&mut manager, &mut host, P, take(10, 0));
        manager.tick(&mut host);
        assert_eq!(clicks.lock().unwrap().len(), 1);
    }
}
