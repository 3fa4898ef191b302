use pdf_booklet::*;

#[test]
fn test_interleave_alternates_sides() {
    for m in 0..10 {
        let front: Vec<SheetRef> = (1..=m).map(SheetRef::front).collect();
        let back: Vec<SheetRef> = (1..=m).map(SheetRef::back).collect();

        let order = interleave_sheets(front.clone(), back.clone()).unwrap();
        assert_eq!(order.len(), 2 * m);
        for i in 0..m {
            assert_eq!(order[2 * i], front[i]);
            assert_eq!(order[2 * i + 1], back[i]);
        }
    }
}

#[test]
fn test_mismatch_fails() {
    for (m, k) in [(1, 0), (0, 1), (2, 1), (3, 5)] {
        match final_order(m, k) {
            Err(BookletError::MismatchedSheetCounts { front, back }) => {
                assert_eq!((front, back), (m, k));
            }
            other => panic!("expected MismatchedSheetCounts, got {:?}", other),
        }
    }
}

#[test]
fn test_final_order_for_plan() {
    let plan = SlotPlan::new(40, SheetGrid::default()).unwrap();
    let order = final_order(plan.front_sheet_count(), plan.back_sheet_count()).unwrap();
    let labels: Vec<String> = order.iter().map(ToString::to_string).collect();
    assert_eq!(labels, ["F1", "B1", "F2", "B2", "F3", "B3"]);
}
