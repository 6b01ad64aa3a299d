//! Integration tests for the memory subsystem
//!
//! Tests data memory bounds handling, code loading and snapshot files.

use uvm_runtime::{load_program, write_snapshot, CodeMemory, DataMemory, MemorySnapshot, VMState};
use uvm_spec::{Instruction, Program, ProgramFormat};

#[test]
fn test_every_cell_addressable() {
    let mut mem = DataMemory::new(1024);
    for addr in 0..1024 {
        assert!(mem.store(addr, addr));
    }
    for addr in 0..1024 {
        assert_eq!(mem.load(addr), addr & 0xFF);
    }
}

#[test]
fn test_bounds() {
    let mut mem = DataMemory::new(1024);
    assert!(mem.store(1023, 1));
    assert!(!mem.store(1024, 1));
    assert!(!mem.store(i64::MIN, 1));
    assert_eq!(mem.load(1023), 1);
    assert_eq!(mem.load(1024), 0);
}

#[test]
fn test_zero_sized_memory() {
    let mut mem = DataMemory::new(0);
    assert!(!mem.store(0, 1));
    assert_eq!(mem.load(0), 0);
    assert_eq!(mem.size(), 0);
}

#[test]
fn test_code_memory_forms() {
    let binary = CodeMemory::load(Program::Binary(vec![0x00, 0x00]), 1024);
    assert_eq!(binary.len(), 2);

    let empty = CodeMemory::load(Program::Binary(Vec::new()), 1024);
    assert!(empty.is_empty());

    let records = CodeMemory::Intermediate(vec![Instruction::ReadMem; 3]);
    assert_eq!(records.len(), 3);
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.json");

    let mut state = VMState::new();
    state.stack = vec![1, 2];
    let memory = DataMemory::with_contents(1024, &[9, 8, 7]);
    let snap = MemorySnapshot::capture(&state, &memory, 0, Some(3));

    write_snapshot(&path, &snap).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"range\": \"0-2\""));
    assert_eq!(MemorySnapshot::from_json(&text).unwrap(), snap);
}

#[test]
fn test_load_program_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.bin");
    std::fs::write(&path, [0x00]).unwrap();

    let program = load_program(&path, ProgramFormat::Binary).unwrap();
    assert_eq!(program.format(), ProgramFormat::Binary);
}
