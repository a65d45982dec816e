/// PROPERTY-BASED TESTS: reconciliation invariants
///
/// Random worlds receive random, possibly hostile, layouts. Whatever is
/// submitted:
/// 1. Slots and the item → parent relation stay consistent, with no item held twice
/// 2. Items are never created or destroyed by reconciliation
/// 3. Denied submissions change nothing
/// 4. Every inventory whose layout changed is scheduled for correction
/// 5. Resubmitting the resulting layout changes nothing

use std::collections::HashMap;

use proptest::prelude::*;

use stash_server::{Character, InventoryConfig, ItemInfo, Participant, Structure};
use stash_shared::{EntityId, InventoryKey, Position, Team};
use stash_test::Fixture;

const ITEM_COUNT: usize = 10;
const MAX_WIRE_ID: u16 = 16;

struct Scene {
    fixture: Fixture,
    participants: Vec<Participant>,
    inventories: Vec<InventoryKey>,
}

impl Scene {
    fn build(initial: &[Option<(usize, usize)>], bo_incapacitated: bool) -> Self {
        let mut fixture = Fixture::new();
        let (ada, ada_participant) =
            fixture.player_with(Character::new("ada").with_team(Team(1)), Position::new(1.0, 1.0));
        let mut bo = Character::new("bo").with_team(Team(2));
        bo.incapacitated = bo_incapacitated;
        let (bo, bo_participant) = fixture.player_with(bo, Position::new(2.0, 2.0));
        let spectator = fixture.participant("spectator");
        let armory = fixture.structure(Structure::new("Armory").with_team(Team(1)));

        let inventories = vec![
            fixture.inventory(Some(ada), InventoryConfig::container(4)),
            fixture.inventory(Some(ada), InventoryConfig::equipment(2).with_slot_filter(0, "ammo")),
            fixture.inventory(Some(bo), InventoryConfig::container(3)),
            fixture.loose_container(4),
            fixture.inventory(Some(armory), InventoryConfig::container(3)),
        ];

        for index in 0..ITEM_COUNT {
            let mut info = ItemInfo::new(format!("Item {}", index));
            match index {
                0 | 1 => info = info.with_tag("ammo"),
                2 => info = info.non_detachable(),
                3 => info = info.hidden(),
                _ => {}
            }
            let item = if index % 2 == 0 {
                fixture.world.spawn_at(info, Position::new(index as f32, 0.0)).unwrap()
            } else {
                fixture.item_with(info)
            };
            if let Some(Some((inventory, slot))) = initial.get(index) {
                let key = inventories[inventory % inventories.len()];
                let _ = fixture.world.put_item(key, *slot, item);
            }
        }

        Self {
            fixture,
            participants: vec![ada_participant, bo_participant, spectator],
            inventories,
        }
    }

    fn layouts(&self) -> HashMap<InventoryKey, Vec<Option<EntityId>>> {
        self.inventories
            .iter()
            .map(|key| (*key, self.fixture.slots(*key)))
            .collect()
    }
}

#[derive(Clone, Debug)]
struct Submission {
    participant: usize,
    inventory: usize,
    desired: Vec<u16>,
}

fn initial_strategy() -> impl Strategy<Value = Vec<Option<(usize, usize)>>> {
    prop::collection::vec(prop::option::of((0usize..5, 0usize..4)), ITEM_COUNT)
}

fn submission_strategy() -> impl Strategy<Value = Submission> {
    (0usize..3, 0usize..5, prop::collection::vec(0u16..MAX_WIRE_ID, 0..6)).prop_map(
        |(participant, inventory, desired)| Submission {
            participant,
            inventory,
            desired,
        },
    )
}

fn desired_ids(raw: &[u16]) -> Vec<Option<EntityId>> {
    raw.iter().map(|value| EntityId::from_wire(*value)).collect()
}

proptest! {
    #[test]
    fn prop_world_stays_consistent(
        initial in initial_strategy(),
        bo_incapacitated in any::<bool>(),
        submissions in prop::collection::vec(submission_strategy(), 1..20),
    ) {
        let mut scene = Scene::build(&initial, bo_incapacitated);
        let entity_count = scene.fixture.world.registry().len();

        for submission in submissions {
            let participant = scene.participants[submission.participant].clone();
            let key = scene.inventories[submission.inventory];
            scene.fixture.submit(&participant, key, &desired_ids(&submission.desired));

            prop_assert_eq!(scene.fixture.world.check_consistency(), Ok(()));
            prop_assert_eq!(scene.fixture.world.registry().len(), entity_count);
        }
    }

    #[test]
    fn prop_denied_submissions_change_nothing(
        initial in initial_strategy(),
        bo_incapacitated in any::<bool>(),
        submission in submission_strategy(),
    ) {
        let mut scene = Scene::build(&initial, bo_incapacitated);
        let before = scene.layouts();

        let participant = scene.participants[submission.participant].clone();
        let key = scene.inventories[submission.inventory];
        let report = scene.fixture.submit(&participant, key, &desired_ids(&submission.desired));

        if report.denied {
            prop_assert!(report.is_noop());
            prop_assert_eq!(scene.layouts(), before);
        }
    }

    #[test]
    fn prop_changed_inventories_are_scheduled(
        initial in initial_strategy(),
        bo_incapacitated in any::<bool>(),
        submission in submission_strategy(),
    ) {
        let mut scene = Scene::build(&initial, bo_incapacitated);
        let before = scene.layouts();

        let participant = scene.participants[submission.participant].clone();
        let key = scene.inventories[submission.inventory];
        scene.fixture.submit(&participant, key, &desired_ids(&submission.desired));

        let after = scene.layouts();
        for inventory in &scene.inventories {
            if before[inventory] != after[inventory] {
                prop_assert!(
                    scene.fixture.server.broadcaster().is_scheduled(*inventory),
                    "{} changed but was not scheduled",
                    inventory
                );
            }
        }
        prop_assert!(scene.fixture.server.broadcaster().is_scheduled(key));
    }

    #[test]
    fn prop_resubmitting_result_is_noop(
        initial in initial_strategy(),
        submission in submission_strategy(),
    ) {
        let mut scene = Scene::build(&initial, false);

        let participant = scene.participants[submission.participant].clone();
        let key = scene.inventories[submission.inventory];
        let report = scene.fixture.submit(&participant, key, &desired_ids(&submission.desired));
        prop_assume!(!report.denied);

        let settled = scene.fixture.slots(key);
        let again = scene.fixture.submit(&participant, key, &settled);

        prop_assert!(again.is_noop());
        prop_assert_eq!(scene.fixture.slots(key), settled);
    }
}
