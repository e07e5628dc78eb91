use std::convert::Infallible;

use magnet2d::prelude::*;

/// Prints the arrow grid as comma-separated rows.
struct CsvRenderer;

impl Renderer for CsvRenderer {
    type Error = Infallible;

    fn render(&mut self, solution: &FieldSolution) -> Result<(), Infallible> {
        let potential = solution.potential();
        println!("# Az range [{:.6e}, {:.6e}]", potential.min(), potential.max());
        println!("# arrow scale {:.6e}", solution.arrow_scale());
        println!("x, y, Bx, By");
        for (x, y, bx, by) in solution.sampled().points() {
            println!("{x:.6}, {y:.6}, {bx:.6e}, {by:.6e}");
        }
        Ok(())
    }
}

fn main() -> Result<(), Magnet2dError> {
    env_logger::init();

    // Unit square bar magnet, 16 × 16 arrows.
    let solution = MagnetSimulation::new(MagnetConfig::new(1.0, 1.0))?.run()?;
    match solution.render(&mut CsvRenderer) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    Ok(())
}
