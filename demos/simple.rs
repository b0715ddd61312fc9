use obdd_rs::comparator::Comparator;
use obdd_rs::graph::Graph;
use obdd_rs::logical::Logical;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut g1 = Graph::new();
    let x1 = g1.add_node(1)?;
    let x2 = g1.add_node(2)?;
    let edge = g1.set_edge_reference(x1, x2, true)?;
    println!("wired {}", edge);
    g1.init()?;
    println!("g1 = {:?}", g1);

    let mut g2 = Graph::new();
    let y1 = g2.add_node(1)?;
    let y2 = g2.add_node(2)?;
    g2.set_edge_reference(y1, y2, true)?;
    g2.init()?;
    println!("g2 = {:?}", g2);

    let comparator = Comparator::new();
    println!(
        "equivalent under OR: {}",
        comparator.compare_with(&g1, &g2, Logical::Or)?
    );
    println!("ordering: {:?}", comparator.compare(&g1, &g2)?);

    println!("{}", g1.to_dot());

    Ok(())
}
