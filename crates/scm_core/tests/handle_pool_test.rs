//! Integration tests for handle pools over a simulated host.
//!
//! The host side is played by hand: the tests flip flag bytes the way the
//! game does when it spawns and deletes entities.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scm_core::{EntityCategory, Handle, HandlePool, PoolBindings, RawMemory, SimulatedMemory};
use scm_shared::{Host, LayoutTable};

const HEADER_REGION: usize = 0x0010_0000;
const TABLE_REGION: usize = 0x0100_0000;
const POOL_SIZE: u32 = 64;

/// Builds a host with all three pools of the given build, all slots free.
fn boot(host: Host) -> (SimulatedMemory, scm_shared::BuildLayout) {
    let table = LayoutTable::builtin().unwrap();
    let layout = table.get(host).unwrap().clone();
    let mem = SimulatedMemory::new();
    mem.map(HEADER_REGION, 0x1000).unwrap();

    for (i, (_, pool)) in layout.pools.iter().enumerate() {
        let symbol = HEADER_REGION + i * 0x40;
        let header = symbol + 0x10;
        let entities = TABLE_REGION + i * 0x0010_0000;
        let flags = entities + POOL_SIZE as usize * pool.entity_size as usize;
        mem.map(entities, POOL_SIZE as usize * pool.entity_size as usize + POOL_SIZE as usize)
            .unwrap();

        mem.define_symbol(pool.symbol.clone(), symbol);
        mem.write_u32(symbol, u32::try_from(header).unwrap(), false);
        mem.write_u32(header, u32::try_from(entities).unwrap(), false);
        mem.write_u32(header + 4, u32::try_from(flags).unwrap(), false);
        mem.write_i32(header + 8, POOL_SIZE as i32, false);
        for slot in 0..POOL_SIZE as usize {
            mem.write_u8(flags + slot, 0x80);
        }
    }
    (mem, layout)
}

fn flags_base(pool: &HandlePool<'_, SimulatedMemory>) -> usize {
    pool.binding().flags_base
}

#[test]
fn test_every_supported_build_binds_three_pools() {
    for host in [Host::Gta3, Host::Re3, Host::Vc, Host::ReVc, Host::Sa] {
        let (mem, layout) = boot(host);
        let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
        assert_eq!(bindings.len(), 3, "{host}");
        for category in EntityCategory::ALL {
            let pool = HandlePool::new(&mem, category, &bindings).unwrap();
            assert_eq!(pool.capacity(), POOL_SIZE);
            assert_eq!(pool.binding().entity_size, layout.pools[category.as_str()].entity_size);
        }
    }
}

#[test]
fn test_pools_do_not_share_state() {
    let (mem, layout) = boot(Host::Vc);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let vehicles = HandlePool::new(&mem, EntityCategory::Vehicle, &bindings).unwrap();
    let peds = HandlePool::new(&mem, EntityCategory::Character, &bindings).unwrap();

    mem.write_u8(flags_base(&vehicles) + 3, 0x01);
    assert_eq!(vehicles.live_slots().count(), 1);
    assert_eq!(peds.live_slots().count(), 0);
}

#[test]
fn test_round_trip_for_every_live_index() {
    let (mem, layout) = boot(Host::Sa);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let pool = HandlePool::new(&mem, EntityCategory::Character, &bindings).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5C3);

    for index in 0..POOL_SIZE {
        let generation: u8 = rng.gen_range(0..0x80);
        mem.write_u8(flags_base(&pool) + index as usize, generation);
        let slot = pool.slot_at(index);
        assert_eq!(pool.handle_to_slot(pool.slot_to_handle(slot)), Some(slot));
    }
}

#[test]
fn test_live_slots_match_free_bit_for_random_tables() {
    let (mem, layout) = boot(Host::Gta3);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let pool = HandlePool::new(&mem, EntityCategory::Object, &bindings).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..100 {
        let mut flags = [0u8; POOL_SIZE as usize];
        rng.fill(&mut flags[..]);
        mem.write_bytes(flags_base(&pool), &flags);

        let expected: Vec<usize> = (0..POOL_SIZE)
            .filter(|i| flags[*i as usize] & 0x80 == 0)
            .map(|i| pool.slot_at(i))
            .collect();
        assert_eq!(pool.live_slots().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn test_handles_survive_only_their_generation() {
    let (mem, layout) = boot(Host::ReVc);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let pool = HandlePool::new(&mem, EntityCategory::Vehicle, &bindings).unwrap();
    let flag = flags_base(&pool) + 10;

    // spawn, take a handle, delete, respawn in the same slot
    mem.write_u8(flag, 0x04);
    let first = pool.slot_to_handle(pool.slot_at(10));
    mem.write_u8(flag, 0x84);
    assert_eq!(pool.handle_to_slot(first), None);
    mem.write_u8(flag, 0x05);
    let second = pool.slot_to_handle(pool.slot_at(10));

    assert_eq!(pool.handle_to_slot(first), None);
    assert_eq!(pool.handle_to_slot(second), Some(pool.slot_at(10)));
    assert_ne!(first, second);
    assert_eq!(first.index(), second.index());
}

#[test]
fn test_generation_wraps_at_128() {
    let (mem, layout) = boot(Host::Re3);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let pool = HandlePool::new(&mem, EntityCategory::Vehicle, &bindings).unwrap();
    let flag = flags_base(&pool);

    mem.write_u8(flag, 0x7F);
    let old = pool.slot_to_handle(pool.slot_at(0));
    mem.write_u8(flag, 0x00);
    let wrapped = pool.slot_to_handle(pool.slot_at(0));

    assert_eq!(wrapped.generation(), 0);
    assert!(!pool.is_valid(old));
    assert!(pool.is_valid(wrapped));
}

#[test]
fn test_random_handles_beyond_capacity_never_resolve() {
    let (mem, layout) = boot(Host::Sa);
    let bindings = PoolBindings::resolve(&mem, &layout).unwrap();
    let pool = HandlePool::new(&mem, EntityCategory::Object, &bindings).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for index in 0..POOL_SIZE {
        mem.write_u8(flags_base(&pool) + index as usize, 0x00);
    }
    for _ in 0..1000 {
        let index = rng.gen_range(POOL_SIZE..=0x00FF_FFFF);
        assert_eq!(pool.handle_to_slot(Handle::new(index, 0x00)), None);
    }
}
