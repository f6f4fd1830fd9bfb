#![no_main]

use libfuzzer_sys::fuzz_target;

use heliumsort::MemoryBudget;

const BUDGETS: [MemoryBudget; 9] = [
    MemoryBudget::Uranium,
    MemoryBudget::Hydrogen,
    MemoryBudget::Helium3A,
    MemoryBudget::Helium3B,
    MemoryBudget::Helium3C,
    MemoryBudget::Elements(0),
    MemoryBudget::Elements(5),
    MemoryBudget::Elements(64),
    MemoryBudget::Elements(700),
];

// The first byte picks the budget, every later byte is a key. The low half of each element holds
// its original position, so comparing against the std stable sort also checks stability.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, keys)) = data.split_first() else {
        return;
    };

    let budget = BUDGETS[selector as usize % BUDGETS.len()];
    // Fold the keys into few distinct values now and then, the key harvesting paths need that.
    let fold = if selector & 0x80 != 0 { 13 } else { 256 };

    let mut v = keys
        .iter()
        .enumerate()
        .map(|(i, &k)| (((k as u32 % fold) << 16) | i as u32))
        .collect::<Vec<u32>>();

    let mut expected = v.clone();
    expected.sort_by_key(|x| x >> 16);

    heliumsort::sort_by_with_memory(&mut v, budget, |a, b| (a >> 16).cmp(&(b >> 16)))
        .expect("small budgets always allocate");
    assert_eq!(v, expected);
});
