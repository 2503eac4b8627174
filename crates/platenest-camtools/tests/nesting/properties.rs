//! Property-based tests for the layout packer and cut derivation.
//!
//! Dimensions are drawn on a 1/8 grid so every sum stays exact in f64.
//! Plates for the emitted-program checks also come off a 0.001 grid, which
//! does not survive the two-decimal coordinate format.

use platenest_camtools::{
    extend_remnant, CutPlan, LayoutPacker, NestingLayout, ProgramValidator, ToolpathGenerator,
    ToolpathParameters,
};
use platenest_core::{CutSegment, PartSpec, Plate};
use proptest::prelude::*;

fn eighth_steps(range: std::ops::RangeInclusive<u32>) -> impl Strategy<Value = f64> {
    range.prop_map(|n| n as f64 * 0.125)
}

fn arb_plate() -> impl Strategy<Value = Plate> {
    (eighth_steps(8..=1600), eighth_steps(8..=800))
        .prop_map(|(w, h)| Plate::new(w, h).expect("positive plate"))
}

fn arb_fine_plate() -> impl Strategy<Value = Plate> {
    (1_000u32..=200_000, 1_000u32..=100_000).prop_map(|(w, h)| {
        Plate::new(w as f64 * 0.001, h as f64 * 0.001).expect("positive plate")
    })
}

fn arb_part() -> impl Strategy<Value = PartSpec> {
    (eighth_steps(0..=800), eighth_steps(0..=480), -1i64..6)
        .prop_map(|(length, width, quantity)| PartSpec::new(length, width, quantity))
}

fn arb_catalog() -> impl Strategy<Value = Vec<PartSpec>> {
    prop::collection::vec(arb_part(), 0..12)
}

fn pack(plate: Plate, catalog: &[PartSpec]) -> NestingLayout {
    LayoutPacker::new(plate).pack(catalog)
}

proptest! {
    #[test]
    fn placed_rects_never_overlap(plate in arb_plate(), catalog in arb_catalog()) {
        let layout = pack(plate, &catalog);
        for (i, a) in layout.placed.iter().enumerate() {
            for b in &layout.placed[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn placed_rects_stay_on_plate(plate in arb_plate(), catalog in arb_catalog()) {
        let layout = pack(plate, &catalog);
        for rect in &layout.placed {
            prop_assert!(plate.contains(rect), "{:?} outside {}", rect, plate);
        }
        prop_assert!(layout.placed_area() <= plate.area());
    }

    #[test]
    fn every_item_is_accounted_for(plate in arb_plate(), catalog in arb_catalog()) {
        let layout = pack(plate, &catalog);
        let expected: i64 = catalog.iter().filter(|p| p.is_valid()).map(|p| p.quantity).sum();
        prop_assert_eq!((layout.placed.len() + layout.unplaced.len()) as i64, expected);
        prop_assert_eq!(
            layout.rejected_entries,
            catalog.iter().filter(|p| !p.is_valid()).count()
        );
    }

    #[test]
    fn packing_is_deterministic(plate in arb_plate(), catalog in arb_catalog()) {
        let first = pack(plate, &catalog);
        let second = pack(plate, &catalog);
        prop_assert_eq!(&first, &second);

        let generator = ToolpathGenerator::new(ToolpathParameters::default());
        let a = generator.generate(&first.vertical_cuts, &first.horizontal_cuts);
        let b = generator.generate(&second.vertical_cuts, &second.horizontal_cuts);
        prop_assert_eq!(a.to_gcode(), b.to_gcode());
    }

    #[test]
    fn cuts_are_complete(plate in arb_plate(), catalog in arb_catalog()) {
        let layout = pack(plate, &catalog);

        for rect in &layout.placed {
            // bottom edge, unless it is the plate bottom
            if rect.y > 0.0 {
                prop_assert!(
                    layout.horizontal_cuts.iter().any(|c| c.y1 == rect.y && c.x1 <= rect.x && c.x2 >= rect.right()),
                    "no cut under {:?}", rect
                );
            }
            // top edge, unless it is the plate top
            if rect.top() < plate.height {
                prop_assert!(
                    layout.horizontal_cuts.iter().any(|c| c.y1 == rect.top() && c.x1 <= rect.x && c.x2 >= rect.right()),
                    "no cut over {:?}", rect
                );
            }
            // column boundary, unless flush with the plate edge; the column is
            // as wide as the longest item sharing its x offset
            let column_right = layout
                .placed
                .iter()
                .filter(|r| r.x == rect.x)
                .map(|r| r.right())
                .fold(rect.right(), f64::max);
            if column_right < plate.width {
                prop_assert!(
                    layout.vertical_cuts.contains(&CutSegment::vertical(column_right, 0.0, plate.height)),
                    "no vertical cut at column edge {} for {:?}", column_right, rect
                );
            }
        }
        for cut in &layout.vertical_cuts {
            prop_assert!(cut.x1 < plate.width);
            prop_assert_eq!(*cut, CutSegment::vertical(cut.x1, 0.0, plate.height));
        }
    }

    #[test]
    fn remnant_extension_is_idempotent(plate in arb_plate(), catalog in arb_catalog()) {
        let layout = pack(plate, &catalog);
        let once = extend_remnant(&plate, &layout.horizontal_cuts);
        let twice = extend_remnant(&plate, &once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), layout.horizontal_cuts.len());
    }

    #[test]
    fn emitted_program_validates_on_fine_plates(
        plate in arb_fine_plate(),
        catalog in arb_catalog(),
        extend in any::<bool>(),
    ) {
        let layout = pack(plate, &catalog);
        let plan = CutPlan::from_layout(&layout, extend);
        let program = ToolpathGenerator::new(ToolpathParameters::default())
            .generate(&plan.vertical, &plan.horizontal);

        let verdict = ProgramValidator::new(plate).validate(&program);
        prop_assert!(verdict.is_ok(), "{:?} on {}", verdict, plate);
    }

    #[test]
    fn emitted_program_validates(plate in arb_plate(), catalog in arb_catalog(), extend in any::<bool>()) {
        let layout = pack(plate, &catalog);
        let plan = CutPlan::from_layout(&layout, extend);
        let program = ToolpathGenerator::new(ToolpathParameters::default())
            .generate(&plan.vertical, &plan.horizontal);

        prop_assert!(ProgramValidator::new(plate).validate(&program).is_ok());
        prop_assert_eq!(program.vertical_pass.len(), 1 + 5 * plan.vertical.len());
        prop_assert_eq!(program.horizontal_pass.len(), 1 + 5 * plan.horizontal.len());
        prop_assert_eq!(program.header.len(), 5);
        prop_assert_eq!(program.footer.len(), 4);
    }
}
