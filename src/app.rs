use clap::{self, Arg, Command};

const DEFAULT_COLOURS: &str = "r,g,b,c,y,m,k";

fn add_inputs(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("input")
            .help("Input files")
            .long_help("If not present or a single dash, standard input will be used")
            .multiple_values(true)
            .takes_value(true),
    )
}

fn add_common(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("separator")
            .long("separator")
            .help("Field separator (runs of whitespace by default)")
            .takes_value(true),
    )
    .arg(
        Arg::new("filter")
            .long("filter")
            .help("Only use lines matching this regex")
            .takes_value(true),
    )
    .arg(
        Arg::new("title")
            .long("title")
            .short('t')
            .help("Chart title")
            .takes_value(true),
    )
    .arg(
        Arg::new("x-label")
            .long("x-label")
            .help("Label on the x axis")
            .takes_value(true),
    )
    .arg(
        Arg::new("y-label")
            .long("y-label")
            .help("Label on the y axis")
            .takes_value(true),
    )
    .args(["min-x", "max-x", "min-y", "max-y"].iter().map(|name| {
        Arg::new(*name)
            .long(*name)
            .help("Limit of the visible area")
            .allow_hyphen_values(true)
            .takes_value(true)
    }))
    .arg(
        Arg::new("width")
            .long("width")
            .short('w')
            .help("Use this many characters as terminal width")
            .default_value("110")
            .takes_value(true),
    )
    .arg(
        Arg::new("height")
            .long("height")
            .short('H')
            .help("Use that many rows for x/y plots")
            .default_value("20")
            .takes_value(true),
    )
    .arg(
        Arg::new("precision")
            .long("precision")
            .short('p')
            .help("Show that many decimals (human units by default)")
            .takes_value(true),
    )
    .arg(
        Arg::new("quiet")
            .long("quiet")
            .short('q')
            .help("Do not print the chart; requires --save")
            .takes_value(false),
    )
    .arg(
        Arg::new("save")
            .long("save")
            .short('s')
            .help("Save the chart with this basename")
            .takes_value(true),
    )
    .arg(
        Arg::new("save-formats")
            .long("save-formats")
            .help("Comma separated formats to save the chart in (txt, ansi)")
            .default_value("txt")
            .takes_value(true),
    )
}

fn add_colours(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("colours")
            .long("colours")
            .short('c')
            .help("Comma separated colours, used in turn by datasets")
            .default_value(DEFAULT_COLOURS)
            .takes_value(true),
    )
    .arg(
        Arg::new("markers")
            .long("markers")
            .short('m')
            .help("Characters used in turn as dataset markers (blank for default)")
            .default_value(" ")
            .takes_value(true),
    )
    .arg(
        Arg::new("legends")
            .long("legends")
            .help("Dataset legends")
            .multiple_values(true)
            .takes_value(true),
    )
}

fn add_logscale(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("logscale")
            .long("logscale")
            .help("Use a logarithmic scale for bar lengths"),
    )
}

fn add_alpha(cmd: Command<'static>, default: &'static str) -> Command<'static> {
    cmd.arg(
        Arg::new("alpha")
            .long("alpha")
            .short('a')
            .help("Comma separated opacities; datasets under 0.5 are dimmed")
            .default_value(default)
            .takes_value(true),
    )
}

fn add_xy_columns(cmd: Command<'static>, y_help: &'static str) -> Command<'static> {
    cmd.arg(
        Arg::new("x-column")
            .long("x-column")
            .short('x')
            .help("Column for x values (1-based)")
            .default_value("1")
            .takes_value(true),
    )
    .arg(
        Arg::new("y-column")
            .long("y-column")
            .short('y')
            .help(y_help)
            .default_value("2")
            .takes_value(true),
    )
}

pub fn get_app() -> Command<'static> {
    let mut hist = Command::new("hist")
        .version(clap::crate_version!())
        .about("Plot histograms of columns of input values")
        .arg(
            Arg::new("field")
                .long("field")
                .short('f')
                .help("Columns to read values from (1-based, cut-like ranges)")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::new("bins")
                .long("bins")
                .short('b')
                .help("Number of bins (10 if neither this nor --bin-size is given)")
                .conflicts_with("bin-size")
                .takes_value(true),
        )
        .arg(
            Arg::new("bin-size")
                .long("bin-size")
                .short('z')
                .help("Width of each bin")
                .takes_value(true),
        )
        .arg(
            Arg::new("unify-bins")
                .long("unify-bins")
                .short('u')
                .help("Use the same bins for all inputs (read all of them first)"),
        )
        .arg(
            Arg::new("disable-bin-offset")
                .long("disable-bin-offset")
                .help("Do not shift fixed width bins by half their width"),
        )
        .arg(
            Arg::new("normed")
                .long("normed")
                .help("Show densities instead of counts"),
        )
        .arg(
            Arg::new("cumulative")
                .long("cumulative")
                .help("Show cumulative counts"),
        )
        .arg(
            Arg::new("hist-type")
                .long("hist-type")
                .short('y')
                .help("Comma separated types: bar, barstacked, step, stepfilled")
                .default_value("bar")
                .takes_value(true),
        );
    hist = add_inputs(add_logscale(add_alpha(add_colours(add_common(hist)), "0.5")));

    let mut bar = Command::new("bar")
        .version(clap::crate_version!())
        .about("Plot a bar chart of values by category")
        .arg(
            Arg::new("cat-field")
                .long("cat-field")
                .short('d')
                .help("Column to read categories from (1-based)")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::new("field")
                .long("field")
                .short('f')
                .help("Columns to read values from (1-based, cut-like ranges)")
                .default_value("2")
                .takes_value(true),
        )
        .arg(
            Arg::new("error-field")
                .long("error-field")
                .short('e')
                .help("Columns to read errors from, one per value column")
                .takes_value(true),
        )
        .arg(
            Arg::new("e-colours")
                .long("e-colours")
                .help("Comma separated colours for error bars")
                .takes_value(true),
        );
    bar = add_inputs(add_logscale(add_alpha(add_colours(add_common(bar)), "0.5")));

    let mut line = Command::new("line")
        .version(clap::crate_version!())
        .about("Plot a line graph per input")
        .arg(
            Arg::new("axes")
                .long("axes")
                .short('a')
                .help("Comma separated 1 and 2, to draw series against a secondary y axis")
                .default_value("1")
                .takes_value(true),
        );
    line = add_inputs(add_xy_columns(
        add_colours(add_common(line)),
        "Columns for y values (1-based, cut-like ranges)",
    ));

    let mut scatter = Command::new("scatter")
        .version(clap::crate_version!())
        .about("Plot x/y points of a single input");
    scatter = add_inputs(add_xy_columns(
        add_alpha(add_colours(add_common(scatter)), "1"),
        "Column for y values (1-based)",
    ));

    Command::new("cligraph")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .max_term_width(100)
        .subcommand_required(true)
        .arg(
            Arg::new("color")
                .long("color")
                .help("Use colors in the output")
                .possible_values(["auto", "no", "yes"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be more verbose")
                .takes_value(false),
        )
        .subcommand(hist)
        .subcommand(bar)
        .subcommand(line)
        .subcommand(scatter)
}
