//! `showmappings` against real i386 page tables built in simulated memory.

mod common;

use common::{BumpAlloc, FakeStack, TestPhys, monitor, run_line};
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};
use kernel_monitor::EntryLookup;
use kernel_vmem::{AddressSpace, PageEntryBits};

#[test]
fn mixed_small_and_large_pages() {
    let phys = TestPhys::with_frames(4);
    let mut alloc = BumpAlloc::new(0x1000, 0x4000);
    let aspace = AddressSpace::from_root(&phys, PhysicalAddress::new(0).page());

    aspace
        .map_one(
            &mut alloc,
            VirtualAddress::new(0xef00_0000),
            PhysicalAddress::new(0x0011_a000),
            PageEntryBits::user_ro(),
        )
        .unwrap();
    aspace
        .map_large(
            VirtualAddress::new(0xf000_0000),
            PhysicalAddress::new(0),
            PageEntryBits::kernel_rw().with_global_translation(true),
        )
        .unwrap();

    let m = monitor(&aspace, FakeStack::new(0));

    let (out, _) = run_line(&m, "sm ef000000 ef001000");
    assert_eq!(
        out,
        "VA [0xef000000] mapped at PA [0x0011a000], permission: -------(U)-(P)\n\
         VA [0xef001000] not mapped.\n"
    );

    let (out, _) = run_line(&m, "sm f03ff000");
    assert_eq!(
        out,
        "VA [0xf03ff000] mapped at PA [0x00000000], permission: -(G)(PS)-----(W)(P)\n"
    );

    let (out, _) = run_line(&m, "sm 0");
    assert_eq!(out, "VA [0x00000000] not mapped.\n");
}

#[test]
fn read_only_walk_never_allocates() {
    let phys = TestPhys::with_frames(1);
    let aspace = AddressSpace::from_root(&phys, PhysicalAddress::new(0).page());
    assert_eq!(aspace.lookup_entry(VirtualAddress::new(0x1000), true), None);
    assert_eq!(aspace.lookup_entry(VirtualAddress::new(0x1000), false), None);
}
