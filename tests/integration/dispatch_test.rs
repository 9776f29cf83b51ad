use super::common::shell_engine;
use statusd::collectors::{GovernorReader, MemoryProbe, VolumeProbe};
use statusd::{Bitmask, Engine, Field, Registry, Update};
use std::fs;
use tempfile::TempDir;

#[test]
fn every_subset_touches_exactly_its_fields() {
    let commands = ["echo a", "echo b", "echo c", "echo d"];
    for bits in 0u64..16 {
        let mut engine = shell_engine(&commands);
        for i in 0..commands.len() {
            engine.fields_mut().write(i, b"old");
        }

        let report = engine.dispatch(Bitmask(bits));
        assert_eq!(report.executed, Bitmask(bits));

        for (i, expected) in ["a", "b", "c", "d"].iter().enumerate() {
            let value = engine.fields().get(i).unwrap().to_string();
            if bits & (1 << i) != 0 {
                assert_eq!(value, *expected, "mask {:#x} field {}", bits, i);
            } else {
                assert_eq!(value, "old", "mask {:#x} field {}", bits, i);
            }
        }
    }
}

#[test]
fn out_of_range_bits_match_cleared_mask() {
    let commands = ["echo a", "echo b", "echo c"];
    let mut with_extra = shell_engine(&commands);
    let mut without = shell_engine(&commands);

    let report = with_extra.dispatch(Bitmask(0b101 | (1 << 3) | (1 << 50)));
    without.dispatch(Bitmask(0b101));

    assert_eq!(report.executed, Bitmask(0b101));
    assert_eq!(report.ignored, Bitmask((1 << 3) | (1 << 50)));
    assert_eq!(with_extra.render(), without.render());
}

#[test]
fn failing_update_does_not_stop_later_bits() {
    let updates = vec![
        Update::shell(0, "echo a"),
        Update::internal(1, MemoryProbe::new("/nonexistent/meminfo")),
        Update::shell(2, "echo c"),
    ];
    let mut engine = Engine::new(Registry::new(updates).unwrap());

    let report = engine.dispatch(Bitmask(0b111));
    assert_eq!(report.executed, Bitmask(0b111));
    assert_eq!(report.failed, Bitmask(0b010));
    assert_eq!(engine.render(), "[a | |c]");
}

#[test]
fn mixed_shell_and_internal_table_renders_in_order() {
    let dir = TempDir::new().unwrap();
    let governor = dir.path().join("scaling_governor");
    let meminfo = dir.path().join("meminfo");
    fs::write(&governor, "schedutil\n").unwrap();
    fs::write(&meminfo, "MemTotal: 4194304 kB\nMemAvailable: 3145728 kB\n").unwrap();

    let updates = vec![
        Update::shell(Field::Time.index(), "echo 12:00:01"),
        Update::shell(Field::Load.index(), "echo 0.42"),
        Update::shell(Field::Temp.index(), "echo +45.0"),
        Update::internal(Field::Volume.index(), VolumeProbe::new("echo 40%", "echo off")),
        Update::internal(Field::Memory.index(), MemoryProbe::new(&meminfo)),
        Update::internal(Field::Governor.index(), GovernorReader::new(&governor)),
        Update::shell(Field::Date.index(), "echo Fri 16 Oct"),
    ];
    let mut engine = Engine::new(Registry::new(updates).unwrap());
    engine.refresh_all();

    assert_eq!(
        engine.render(),
        "[12:00:01 |0.42 |+45.0 |40%M |1.0/4.0G |U |Fri 16 Oct]"
    );
}
