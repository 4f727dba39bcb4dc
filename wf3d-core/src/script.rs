/// Scene script parser
///
/// A script is a sequence of command keywords, each on its own line, with the
/// operands (if any) on the line that follows. Blank lines and lines starting
/// with `#` are ignored. Parsing stops after `quit`.
use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::take_till1,
    character::complete::{alpha1, anychar, space0, space1},
    combinator::{eof, map_opt},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::transform::Axis;

/// One parsed scene command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line { start: Point3<f32>, end: Point3<f32> },
    Circle { center: Point3<f32>, radius: f32 },
    /// `x0 y0 x1 y1 rx0 ry0 rx1 ry1`
    Hermite([f32; 8]),
    /// `x0 y0 x1 y1 x2 y2 x3 y3`
    Bezier([f32; 8]),
    Box { corner: Point3<f32>, size: Vector3<f32> },
    Sphere { center: Point3<f32>, radius: f32 },
    Torus { center: Point3<f32>, r1: f32, r2: f32 },
    Scale(Vector3<f32>),
    Move(Vector3<f32>),
    Rotate { axis: Axis, degrees: f32 },
    Push,
    Pop,
    Display,
    Save(String),
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Line { .. } => "line",
            Command::Circle { .. } => "circle",
            Command::Hermite(_) => "hermite",
            Command::Bezier(_) => "bezier",
            Command::Box { .. } => "box",
            Command::Sphere { .. } => "sphere",
            Command::Torus { .. } => "torus",
            Command::Scale(_) => "scale",
            Command::Move(_) => "move",
            Command::Rotate { .. } => "rotate",
            Command::Push => "push",
            Command::Pop => "pop",
            Command::Display => "display",
            Command::Save(_) => "save",
            Command::Quit => "quit",
        }
    }
}

/// Parse a whole script into commands.
pub fn parse_script(input: &str) -> Result<Vec<Command>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'));

    let mut commands = Vec::new();
    while let Some((line, text)) = lines.next() {
        let keyword = finish(line, command_word(text), "expected a command keyword")?;
        let mut operands = || {
            lines.next().ok_or_else(|| Error::Script {
                line,
                message: format!("`{}` is missing its operand line", keyword),
            })
        };

        let command = match keyword {
            "line" => {
                let (line, text) = operands()?;
                let [x1, y1, z1, x2, y2, z2] = finish(line, numbers::<6>(text), "expected 6 numbers")?;
                Command::Line {
                    start: Point3::new(x1, y1, z1),
                    end: Point3::new(x2, y2, z2),
                }
            }
            "circle" => {
                let (line, text) = operands()?;
                let [cx, cy, cz, r] = finish(line, numbers::<4>(text), "expected 4 numbers")?;
                Command::Circle {
                    center: Point3::new(cx, cy, cz),
                    radius: r,
                }
            }
            "hermite" => {
                let (line, text) = operands()?;
                Command::Hermite(finish(line, numbers::<8>(text), "expected 8 numbers")?)
            }
            "bezier" => {
                let (line, text) = operands()?;
                Command::Bezier(finish(line, numbers::<8>(text), "expected 8 numbers")?)
            }
            "box" => {
                let (line, text) = operands()?;
                let [x, y, z, w, h, d] = finish(line, numbers::<6>(text), "expected 6 numbers")?;
                Command::Box {
                    corner: Point3::new(x, y, z),
                    size: Vector3::new(w, h, d),
                }
            }
            "sphere" => {
                let (line, text) = operands()?;
                let [x, y, z, r] = finish(line, numbers::<4>(text), "expected 4 numbers")?;
                Command::Sphere {
                    center: Point3::new(x, y, z),
                    radius: r,
                }
            }
            "torus" => {
                let (line, text) = operands()?;
                let [x, y, z, r1, r2] = finish(line, numbers::<5>(text), "expected 5 numbers")?;
                Command::Torus {
                    center: Point3::new(x, y, z),
                    r1,
                    r2,
                }
            }
            "scale" => {
                let (line, text) = operands()?;
                let [x, y, z] = finish(line, numbers::<3>(text), "expected 3 numbers")?;
                Command::Scale(Vector3::new(x, y, z))
            }
            "move" => {
                let (line, text) = operands()?;
                let [x, y, z] = finish(line, numbers::<3>(text), "expected 3 numbers")?;
                Command::Move(Vector3::new(x, y, z))
            }
            "rotate" => {
                let (line, text) = operands()?;
                let (axis, degrees) = finish(line, rotation(text), "expected an axis (x, y or z) and an angle")?;
                Command::Rotate { axis, degrees }
            }
            "save" => {
                let (line, text) = operands()?;
                Command::Save(finish(line, file_name(text), "expected a file name")?.to_string())
            }
            "push" => Command::Push,
            "pop" => Command::Pop,
            "display" => Command::Display,
            "quit" => {
                commands.push(Command::Quit);
                break;
            }
            other => {
                return Err(Error::Script {
                    line,
                    message: format!("unknown command `{}`", other),
                })
            }
        };
        commands.push(command);
    }

    Ok(commands)
}

fn finish<T>(line: usize, parsed: IResult<&str, T>, message: &str) -> Result<T> {
    parsed.map(|(_, value)| value).map_err(|_| Error::Script {
        line,
        message: message.to_string(),
    })
}

fn command_word(input: &str) -> IResult<&str, &str> {
    terminated(alpha1, eof)(input)
}

/// Exactly `N` whitespace-separated numbers and nothing else.
fn numbers<const N: usize>(input: &str) -> IResult<&str, [f32; N]> {
    let mut values = [0.0; N];
    let mut rest = input;
    for (i, slot) in values.iter_mut().enumerate() {
        let (r, value) = if i == 0 {
            float(rest)?
        } else {
            preceded(space1, float)(rest)?
        };
        *slot = value;
        rest = r;
    }
    let (rest, _) = terminated(space0, eof)(rest)?;
    Ok((rest, values))
}

fn rotation(input: &str) -> IResult<&str, (Axis, f32)> {
    let (rest, axis) = map_opt(anychar, Axis::from_char)(input)?;
    let (rest, degrees) = preceded(space1, float)(rest)?;
    let (rest, _) = terminated(space0, eof)(rest)?;
    Ok((rest, (axis, degrees)))
}

fn file_name(input: &str) -> IResult<&str, &str> {
    let (rest, name) = take_till1(char::is_whitespace)(input)?;
    let (rest, _) = terminated(space0, eof)(rest)?;
    Ok((rest, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        let script = "\
line
0 0 0 10 10 10
circle
1 2 3 4
hermite
0 0 1 1 2 2 3 3
bezier
0 0 1 1 2 2 3 3
box
1 2 3 4 5 6
sphere
0 0 0 50
torus
0 0 0 10 40
scale
2 2 2
move
-1.5 2 0
rotate
y 45
push
pop
display
save
out.png
quit
";
        let commands = parse_script(script).unwrap();
        let names: Vec<&str> = commands.iter().map(Command::name).collect();
        assert_eq!(
            names,
            [
                "line", "circle", "hermite", "bezier", "box", "sphere", "torus", "scale", "move",
                "rotate", "push", "pop", "display", "save", "quit"
            ]
        );
        assert_eq!(
            commands[8],
            Command::Move(Vector3::new(-1.5, 2.0, 0.0))
        );
        assert_eq!(
            commands[9],
            Command::Rotate {
                axis: Axis::Y,
                degrees: 45.0
            }
        );
        assert_eq!(commands[13], Command::Save("out.png".to_string()));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let script = "# header\n\npush\n   \n# note\nmove\n1 2 3\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            [Command::Push, Command::Move(Vector3::new(1.0, 2.0, 3.0))]
        );
    }

    #[test]
    fn test_parsing_stops_at_quit() {
        let script = "display\nquit\nthis is not a command\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(commands, [Command::Display, Command::Quit]);
    }

    #[test]
    fn test_unknown_command_reports_line() {
        let result = parse_script("push\n\nfrobnicate\n");
        assert!(matches!(result, Err(Error::Script { line: 3, .. })));
    }

    #[test]
    fn test_wrong_operand_count_reports_operand_line() {
        let result = parse_script("scale\n1 2\n");
        assert!(matches!(result, Err(Error::Script { line: 2, .. })));
        let result = parse_script("scale\n1 2 3 4\n");
        assert!(matches!(result, Err(Error::Script { line: 2, .. })));
    }

    #[test]
    fn test_missing_operand_line() {
        let result = parse_script("push\nbox\n");
        assert!(matches!(result, Err(Error::Script { line: 2, .. })));
    }

    #[test]
    fn test_bad_rotation_axis() {
        let result = parse_script("rotate\nw 90\n");
        assert!(matches!(result, Err(Error::Script { line: 2, .. })));
    }
}
