/// Who may rearrange which inventory, and which items they may claim

use stash_server::{
    AccessPolicy, AccessTarget, Avatar, Character, InventoryConfig, InventorySyncServer,
    InventoryWorld, ItemInfo, Structure, SyncConfig,
};
use stash_shared::{EntityId, Position, Team};
use stash_test::{assert_consistent, assert_layout, assert_scheduled, Fixture};

#[test]
fn living_characters_cannot_be_rearranged_by_others() {
    let mut fixture = Fixture::new();
    let (ada, _) = fixture.player("ada", Position::default());
    let (_, bo) = fixture.player("bo", Position::default());
    let backpack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let apple = fixture.item("Apple");
    fixture.fill(backpack, &[Some(apple)]);

    let report = fixture.submit(&bo, backpack, &[None, None]);

    assert!(report.denied);
    assert_layout!(fixture, backpack, [Some(apple), None]);
    assert_eq!(fixture.scheduled(), vec![backpack]);
}

#[test]
fn incapacitated_characters_can_be_looted() {
    let mut fixture = Fixture::new();
    let (ada, _) = fixture.player("ada", Position::new(1.0, 1.0));
    let (bo, bo_participant) = fixture.player("bo", Position::new(2.0, 2.0));
    let ada_pack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let bo_pack = fixture.inventory(Some(bo), InventoryConfig::container(2));
    let coin = fixture.item("Coin");
    fixture.fill(ada_pack, &[Some(coin)]);

    fixture.world.set_incapacitated(ada, true).unwrap();
    let report = fixture.submit(&bo_participant, bo_pack, &[Some(coin), None]);

    assert!(!report.denied);
    assert_layout!(fixture, bo_pack, [Some(coin), None]);
    assert_layout!(fixture, ada_pack, [None, None]);
    assert_scheduled!(fixture, ada_pack);
    assert_consistent!(fixture.world);
}

#[test]
fn items_of_living_characters_are_not_visible() {
    let mut fixture = Fixture::new();
    let (ada, _) = fixture.player("ada", Position::default());
    let (bo, bo_participant) = fixture.player("bo", Position::default());
    let ada_pack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let bo_pack = fixture.inventory(Some(bo), InventoryConfig::container(2));
    let coin = fixture.item("Coin");
    fixture.fill(ada_pack, &[Some(coin)]);

    let report = fixture.submit(&bo_participant, bo_pack, &[Some(coin), None]);

    assert!(!report.denied);
    assert_eq!(report.refused, vec![(0, coin)]);
    assert_layout!(fixture, bo_pack, [None, None]);
    assert_layout!(fixture, ada_pack, [Some(coin), None]);
    // bo's client believed the coin moved, so ada's pack is re-asserted too
    assert_eq!(fixture.scheduled(), vec![bo_pack, ada_pack]);
}

#[test]
fn team_structures_are_open_to_their_team_only() {
    let mut fixture = Fixture::new();
    let (_, ada) = fixture.player_with(Character::new("ada").with_team(Team(1)), Position::default());
    let (_, bo) = fixture.player_with(Character::new("bo").with_team(Team(2)), Position::default());
    let armory = fixture.structure(Structure::new("Armory").with_team(Team(1)));
    let rack = fixture.inventory(Some(armory), InventoryConfig::container(2));
    let rifle = fixture.item("Rifle");

    assert!(fixture.submit(&bo, rack, &[Some(rifle), None]).denied);
    assert_layout!(fixture, rack, [None, None]);

    assert!(!fixture.submit(&ada, rack, &[Some(rifle), None]).denied);
    assert_layout!(fixture, rack, [Some(rifle), None]);
}

#[test]
fn unaffiliated_structures_are_open_to_everyone() {
    let mut fixture = Fixture::new();
    let (_, bo) = fixture.player_with(Character::new("bo").with_team(Team(2)), Position::default());
    let well = fixture.structure(Structure::new("Well"));
    let bucket = fixture.inventory(Some(well), InventoryConfig::container(1));
    let rope = fixture.item("Rope");

    fixture.submit(&bo, bucket, &[Some(rope)]);

    assert_layout!(fixture, bucket, [Some(rope)]);
}

#[test]
fn participants_without_avatar_are_denied() {
    let mut fixture = Fixture::new();
    let spectator = fixture.participant("spectator");
    let chest = fixture.loose_container(2);
    let apple = fixture.item("Apple");

    let report = fixture.submit(&spectator, chest, &[Some(apple), None]);

    assert!(report.denied);
    assert_layout!(fixture, chest, [None, None]);
}

#[test]
fn despawned_avatar_is_treated_as_missing() {
    let mut fixture = Fixture::new();
    let (ada, participant) = fixture.player("ada", Position::default());
    let chest = fixture.loose_container(1);
    let apple = fixture.item("Apple");
    fixture.world.despawn(ada).unwrap();

    let report = fixture.submit(&participant, chest, &[Some(apple)]);

    assert!(report.denied);
    assert_layout!(fixture, chest, [None]);
}

#[test]
fn containers_inherit_access_from_where_they_sit() {
    let mut fixture = Fixture::new();
    let (ada, ada_participant) = fixture.player("ada", Position::default());
    let (_, bo_participant) = fixture.player("bo", Position::default());
    let backpack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let pouch = fixture.item("Pouch");
    let pouch_slots = fixture.inventory(Some(pouch), InventoryConfig::container(2));
    let coin = fixture.item("Coin");
    fixture.fill(backpack, &[Some(pouch)]);

    assert!(fixture.submit(&bo_participant, pouch_slots, &[Some(coin), None]).denied);
    assert!(!fixture.submit(&ada_participant, pouch_slots, &[Some(coin), None]).denied);
    assert_layout!(fixture, pouch_slots, [Some(coin), None]);

    // once on the ground the pouch is anyone's
    fixture.submit(&ada_participant, backpack, &[None, None]);
    assert!(!fixture.submit(&bo_participant, pouch_slots, &[None, Some(coin)]).denied);
    assert_layout!(fixture, pouch_slots, [None, Some(coin)]);
}

#[test]
fn hidden_items_cannot_be_claimed() {
    let mut fixture = Fixture::new();
    let (ada, participant) = fixture.player("ada", Position::default());
    let backpack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let chest = fixture.loose_container(1);
    let trap = fixture.item_with(ItemInfo::new("Trap").hidden());
    fixture.fill(chest, &[Some(trap)]);

    let report = fixture.submit(&participant, backpack, &[Some(trap), None]);

    assert_eq!(report.refused, vec![(0, trap)]);
    assert_layout!(fixture, chest, [Some(trap)]);
    assert_layout!(fixture, backpack, [None, None]);
}

#[test]
fn hidden_items_already_held_can_be_shuffled() {
    let mut fixture = Fixture::new();
    let (ada, participant) = fixture.player("ada", Position::default());
    let backpack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let curse = fixture.item_with(ItemInfo::new("Curse").hidden());
    fixture.fill(backpack, &[Some(curse)]);

    fixture.submit(&participant, backpack, &[None, Some(curse)]);

    assert_layout!(fixture, backpack, [None, Some(curse)]);
    assert_consistent!(fixture.world);
}

/// Everyone may touch everything, but nobody may take anything new
struct LookButDontTake;

impl AccessPolicy for LookButDontTake {
    fn can_access(&self, _: &InventoryWorld, _: &Avatar, _: &AccessTarget) -> bool {
        true
    }

    fn can_take_item(&self, _: &InventoryWorld, _: &Avatar, _: EntityId, _: &ItemInfo) -> bool {
        false
    }
}

#[test]
fn custom_policies_plug_into_the_server() {
    let mut fixture = Fixture::new();
    let mut server = InventorySyncServer::new(SyncConfig::default(), LookButDontTake);
    let (ada, _) = fixture.player("ada", Position::default());
    let (_, bo) = fixture.player("bo", Position::default());
    let backpack = fixture.inventory(Some(ada), InventoryConfig::container(2));
    let apple = fixture.item("Apple");
    let bread = fixture.item("Bread");
    fixture.fill(backpack, &[Some(apple)]);

    let report = server.reconcile(&mut fixture.world, &bo, backpack, &[Some(bread), Some(apple)]);

    assert!(!report.denied);
    assert_eq!(report.placed, vec![(1, apple)]);
    assert_eq!(report.refused, vec![(0, bread)]);
    assert_layout!(fixture, backpack, [None, Some(apple)]);
    assert!(server.broadcaster().is_scheduled(backpack));
}
