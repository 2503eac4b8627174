use platenest_camtools::{
    extend_remnant, CutPlan, LayoutPacker, LayoutStatus, ProgramValidator, ToolpathGenerator,
    ToolpathParameters,
};
use platenest_core::{CutSegment, PartSpec, PlacedRect, Plate};

#[test]
fn test_single_column_two_items() {
    let plate = Plate::new(96.0, 48.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[PartSpec::new(40.0, 20.0, 2)]);

    assert_eq!(
        layout.placed,
        vec![
            PlacedRect::new(0.0, 28.0, 40.0, 20.0),
            PlacedRect::new(0.0, 8.0, 40.0, 20.0),
        ]
    );
    // One cut under each item; neither rests on the plate bottom.
    assert_eq!(
        layout.horizontal_cuts,
        vec![
            CutSegment::horizontal(28.0, 0.0, 40.0),
            CutSegment::horizontal(8.0, 0.0, 40.0),
        ]
    );
    assert!(layout.horizontal_cuts.iter().all(|c| c.y1 != 48.0 && c.y1 != 0.0));
    assert_eq!(layout.vertical_cuts, vec![CutSegment::vertical(40.0, 0.0, 48.0)]);
}

#[test]
fn test_item_longer_than_plate() {
    let plate = Plate::new(10.0, 10.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[PartSpec::new(20.0, 5.0, 1)]);

    assert!(layout.placed.is_empty());
    assert_eq!(layout.unplaced.len(), 1);
    assert_eq!(layout.status(), LayoutStatus::Partial { unplaced: 1 });

    let plan = CutPlan::from_layout(&layout, false);
    let program = ToolpathGenerator::new(ToolpathParameters::default())
        .generate(&plan.vertical, &plan.horizontal);
    assert_eq!(program.vertical_pass.len(), 1);
    assert_eq!(program.horizontal_pass.len(), 1);
}

#[test]
fn test_empty_catalog_still_framed() {
    let plate = Plate::new(96.0, 48.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[]);
    assert!(layout.placed.is_empty());
    assert!(layout.vertical_cuts.is_empty());
    assert!(layout.horizontal_cuts.is_empty());
    assert_eq!(layout.status(), LayoutStatus::NoValidItems);

    let program = ToolpathGenerator::new(ToolpathParameters::default()).generate(&[], &[]);
    let gcode = program.to_gcode();
    assert!(gcode.starts_with("%\nO1000 (NESTING CUT)"));
    assert!(gcode.contains("(--- 1st Pass: VERTICAL ---)"));
    assert!(gcode.contains("(--- 2nd Pass: HORIZONTAL ---)"));
    assert!(gcode.ends_with("M30 (End of Program)\n%"));
}

#[test]
fn test_remnant_extension_example() {
    let plate = Plate::new(60.0, 20.0).unwrap();
    let cuts = vec![
        CutSegment::from([0.0, 10.0, 50.0, 10.0]),
        CutSegment::from([0.0, 5.0, 48.0, 5.0]),
    ];
    let extended = extend_remnant(&plate, &cuts);
    assert_eq!(extended[0], CutSegment::from([0.0, 10.0, 60.0, 10.0]));
    assert_eq!(extended[1], CutSegment::from([0.0, 5.0, 48.0, 5.0]));
}

#[test]
fn test_remnant_only_touches_last_column() {
    // Columns of width 40 and 30 on a 100 wide plate.
    let plate = Plate::new(100.0, 30.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[
        PartSpec::new(40.0, 10.0, 3),
        PartSpec::new(30.0, 10.0, 2),
    ]);
    let plan = CutPlan::from_layout(&layout, true);

    let interior: Vec<_> = plan.horizontal.iter().filter(|c| c.x1 == 0.0).collect();
    let last: Vec<_> = plan.horizontal.iter().filter(|c| c.x1 == 40.0).collect();
    assert_eq!(interior.len(), 2);
    assert!(interior.iter().all(|c| c.x2 == 40.0));
    assert_eq!(last.len(), 2);
    assert!(last.iter().all(|c| c.x2 == 100.0));
    assert_eq!(
        plan.vertical,
        vec![
            CutSegment::vertical(40.0, 0.0, 30.0),
            CutSegment::vertical(70.0, 0.0, 30.0),
        ]
    );
}

#[test]
fn test_full_program_for_layout() {
    let plate = Plate::new(96.0, 48.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[PartSpec::new(40.0, 20.0, 2)]);
    let plan = CutPlan::from_layout(&layout, false);
    let program = ToolpathGenerator::new(ToolpathParameters::default())
        .generate(&plan.vertical, &plan.horizontal);

    let expected = "\
%
O1000 (NESTING CUT)
G21 G90 (Metric, Absolute)
F1000
G0 Z0.5 (Safe Height)
(--- 1st Pass: VERTICAL ---)
(Vertical Cut #1)
G0 X40.00 Y0.00
M3 (Cut On)
G1 X40.00 Y48.00
M5 (Cut Off)
(--- 2nd Pass: HORIZONTAL ---)
(Horizontal Cut #1)
G0 X0.00 Y28.00
M3 S1000
G1 X40.00 Y28.00
M5
(Horizontal Cut #2)
G0 X0.00 Y8.00
M3 S1000
G1 X40.00 Y8.00
M5
G0 Z10.0
G0 X0 Y0
M30 (End of Program)
%";
    assert_eq!(program.to_gcode(), expected);
}

#[test]
fn test_plates_off_the_two_decimal_grid_validate() {
    let generator = ToolpathGenerator::new(ToolpathParameters::default());

    // Imperial stock in 1/8" steps: the vertical cut ends at Y48.875.
    let plate = Plate::new(96.0, 48.875).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[PartSpec::new(40.0, 20.0, 2)]);
    let plan = CutPlan::from_layout(&layout, false);
    let program = generator.generate(&plan.vertical, &plan.horizontal);
    assert!(ProgramValidator::new(plate).validate(&program).is_ok());

    // Remnant cuts run out to 96.006, printed as X96.01.
    let plate = Plate::new(96.006, 48.0).unwrap();
    let layout = LayoutPacker::new(plate).pack(&[PartSpec::new(40.0, 20.0, 2)]);
    let plan = CutPlan::from_layout(&layout, true);
    let program = generator.generate(&plan.vertical, &plan.horizontal);
    assert!(program.to_gcode().contains("G1 X96.01 Y28.00"));
    assert!(ProgramValidator::new(plate).validate(&program).is_ok());
}
