/// Assert that slots and the item → parent relation agree everywhere and
/// that no item is held twice
#[macro_export]
macro_rules! assert_consistent {
    ($world:expr) => {
        if let Err(error) = $world.check_consistency() {
            panic!("World is inconsistent: {}", error);
        }
    };
}

/// Assert the exact slot layout of an inventory
#[macro_export]
macro_rules! assert_layout {
    ($fixture:expr, $key:expr, $expected:expr) => {
        assert_eq!(
            $fixture.slots($key),
            $expected.to_vec(),
            "Unexpected layout for {}",
            $key
        );
    };
}

/// Assert that an inventory has a correction pending
#[macro_export]
macro_rules! assert_scheduled {
    ($fixture:expr, $key:expr) => {
        assert!(
            $fixture.server.broadcaster().is_scheduled($key),
            "Expected {} to be scheduled for correction, pending: {:?}",
            $key,
            $fixture.scheduled()
        );
    };
}
