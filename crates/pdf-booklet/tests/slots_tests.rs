use pdf_booklet::*;

fn pages(sequence: &SlotSequence) -> Vec<usize> {
    sequence.pages()
}

#[test]
fn test_front_slots_are_odd_pages() {
    for n in 0..=64 {
        let front = build_front_slots(n);
        assert_eq!(front.len(), n.div_ceil(2), "N={}", n);
        assert_eq!(front.blank_count(), 0, "N={}", n);
        assert_eq!(
            pages(&front),
            (1..=n).step_by(2).collect::<Vec<_>>(),
            "N={}",
            n
        );
    }
}

#[test]
fn test_back_slots_are_even_length_even_pages() {
    for n in 0..=64 {
        let back = build_back_slots(n);
        assert_eq!(back.len() % 2, 0, "N={}", n);
        assert!(back.blank_count() <= 1, "N={}", n);

        let mut real = pages(&back);
        real.sort_unstable();
        assert_eq!(real, (2..=n).step_by(2).collect::<Vec<_>>(), "N={}", n);
    }
}

#[test]
fn test_back_pairs_transposed() {
    let back = build_back_slots(8);
    assert_eq!(
        back.slots(),
        &[Slot::Page(4), Slot::Page(2), Slot::Page(8), Slot::Page(6)]
    );
}

#[test]
fn test_back_padding_before_last() {
    let back = build_back_slots(6);
    assert_eq!(
        back.slots(),
        &[Slot::Page(4), Slot::Page(2), Slot::Blank, Slot::Page(6)]
    );
    assert_eq!(back.to_string(), "4,2,{},6");
}

#[test]
fn test_zero_pages() {
    assert!(build_front_slots(0).is_empty());
    assert!(build_back_slots(0).is_empty());

    let plan = SlotPlan::new(0, SheetGrid::default()).unwrap();
    assert_eq!(plan.front_sheet_count(), 0);
    assert_eq!(plan.back_sheet_count(), 0);
    assert!(final_order(0, 0).unwrap().is_empty());
}

#[test]
fn test_builders_are_idempotent() {
    for n in [0, 1, 6, 17, 40] {
        assert_eq!(build_front_slots(n), build_front_slots(n));
        assert_eq!(build_back_slots(n), build_back_slots(n));
    }
}

#[test]
fn test_sides_are_labelled() {
    assert_eq!(build_front_slots(4).side(), SheetSide::Front);
    assert_eq!(build_back_slots(4).side(), SheetSide::Back);
}

#[test]
fn test_plan_sheet_counts() {
    let plan = SlotPlan::new(20, SheetGrid::default()).unwrap();
    assert_eq!(plan.front_sheet_count(), 2);
    assert_eq!(plan.back_sheet_count(), 2);
    assert!(plan.is_balanced());

    // Nine fronts need two sheets, eight backs only one
    let plan = SlotPlan::new(17, SheetGrid::default()).unwrap();
    assert_eq!(plan.front_sheet_count(), 2);
    assert_eq!(plan.back_sheet_count(), 1);
    assert!(!plan.is_balanced());
}

#[test]
fn test_even_page_counts_balance_on_even_grids() {
    for n in (0..=64).step_by(2) {
        let plan = SlotPlan::new(n, SheetGrid::default()).unwrap();
        assert!(plan.is_balanced(), "N={}", n);
    }
}

#[test]
fn test_plan_rejects_empty_grid() {
    let result = SlotPlan::new(8, SheetGrid::new(0, 4));
    assert!(matches!(result, Err(BookletError::InvalidInput(_))));
}

#[test]
fn test_plan_rejects_overflowing_grid() {
    let grid = SheetGrid::new(usize::MAX, 2);
    assert_eq!(grid.checked_cells(), None);
    assert_eq!(grid.cells(), 0);
    let result = SlotPlan::new(8, grid);
    assert!(matches!(result, Err(BookletError::InvalidInput(_))));
}

#[test]
fn test_empty_grid_yields_no_sheets() {
    let front = build_front_slots(8);
    for grid in [SheetGrid::new(0, 4), SheetGrid::new(usize::MAX, 2)] {
        assert_eq!(front.sheets(grid).count(), 0);
        assert_eq!(front.sheet_count(grid), 0);
    }
}

#[test]
fn test_page_count_parsing() {
    assert_eq!("12".parse::<PageCount>().unwrap().get(), 12);
    assert_eq!("12.0".parse::<PageCount>().unwrap().get(), 12);
    assert_eq!(PageCount::try_from(0i64).unwrap().get(), 0);

    for bad in ["-3", "2.5", "NaN", "inf", "twelve", ""] {
        assert!(
            matches!(bad.parse::<PageCount>(), Err(BookletError::InvalidInput(_))),
            "{:?} should be rejected",
            bad
        );
    }
    assert!(PageCount::try_from(-1i64).is_err());
    assert!(PageCount::try_from(f64::INFINITY).is_err());
}
