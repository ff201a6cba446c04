use iced::{
    executor, mouse,
    time::{self, Duration, Instant},
    widget::{button, canvas, checkbox, column, row, text, text_input, Canvas, Column},
    Application, Color, Command, Element, Length, Point, Rectangle, Renderer, Subscription, Theme,
};
use log::{error, info};
use solar_system_simulator::sim::{
    initial_parameters::{parse_time_step, DisplayScale, InitialParameters, PLANETS, STAR},
    system::SolarSystem,
    units::Float,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug)]
pub(crate) enum Message {
    TimeStepChanged(String),
    PlanetToggled(usize, bool),
    Start,
    TogglePause,
    Tick(Instant),
}

pub(crate) struct Gui {
    time_step_input: String,
    params: InitialParameters,
    system: SolarSystem,
    scale: DisplayScale,
    frame_index: u64,
    running: bool,
    status: String,
}

impl Gui {
    fn build_system(params: &InitialParameters) -> (SolarSystem, String) {
        match SolarSystem::from_parameters(params) {
            Ok(system) => (system, String::new()),
            Err(err) => {
                error!("Could not set up the solar system: {}", err);
                (SolarSystem::new(params.time_step), err.to_string())
            }
        }
    }

    fn restart(&mut self) {
        self.params.time_step = parse_time_step(&self.time_step_input);
        self.time_step_input = format!("{}", self.params.time_step);
        let (system, status) = Self::build_system(&self.params);
        self.scale = DisplayScale::fitting(&system);
        self.system = system;
        self.running = status.is_empty();
        self.status = status;
        self.frame_index = 0;
        info!("Simulation restarted.");
    }

    /// One animation frame is one simulation step.
    fn tick(&mut self) {
        if !self.running {
            return;
        }
        match self.system.advance() {
            Ok(()) => self.frame_index += 1,
            Err(err) => {
                error!("Simulation step failed: {}", err);
                self.status = err.to_string();
                self.running = false;
            }
        }
    }

    fn orbit_view(&self) -> OrbitView {
        let mut view = OrbitView {
            star: None,
            planets: vec![],
            axis_limit: self.scale.axis_limit,
        };
        for (name, body) in self.system.active_bodies() {
            let point = SolarSystem::normalize_for_display(&body.coordinates(), &self.scale);
            if name == STAR {
                view.star = Some(point);
            } else {
                view.planets.push(point);
            }
        }
        view
    }
}

impl Application for Gui {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let params = InitialParameters::default();
        let (system, status) = Self::build_system(&params);
        let gui = Gui {
            time_step_input: format!("{}", params.time_step),
            scale: DisplayScale::fitting(&system),
            params,
            system,
            frame_index: 0,
            running: false,
            status,
        };
        (gui, Command::none())
    }

    fn title(&self) -> String {
        String::from("S3 - Solar System Simulator")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::TimeStepChanged(input) => self.time_step_input = input,
            Message::PlanetToggled(index, enabled) => self.params.enabled_planets[index] = enabled,
            Message::Start => self.restart(),
            Message::TogglePause => {
                self.running = !self.running && self.status.is_empty();
            }
            Message::Tick(_) => self.tick(),
        }
        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.running {
            time::every(FRAME_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let planet_boxes: Vec<Element<'_, Message>> = PLANETS
            .iter()
            .enumerate()
            .map(|(index, planet)| {
                checkbox(planet.name, self.params.enabled_planets[index], move |enabled| {
                    Message::PlanetToggled(index, enabled)
                })
                .into()
            })
            .collect();

        let controls = column![
            row![
                text("Time step: "),
                text_input("3600", &self.time_step_input)
                    .on_input(Message::TimeStepChanged)
                    .width(Length::Fixed(80.)),
                text(" seconds"),
            ]
            .spacing(5),
            text("Choose planets for simulation."),
            Column::with_children(planet_boxes).spacing(5),
            row![
                button("Start").on_press(Message::Start),
                button(if self.running { "Pause" } else { "Resume" })
                    .on_press(Message::TogglePause),
            ]
            .spacing(10),
            text(self.system.elapsed_description(self.frame_index)),
            text(&self.status),
        ]
        .spacing(10)
        .padding(20)
        .width(Length::Fixed(300.));

        let orbits = Canvas::new(self.orbit_view())
            .width(Length::Fill)
            .height(Length::Fill);

        row![controls, orbits].into()
    }
}

struct OrbitView {
    star: Option<(Float, Float)>,
    planets: Vec<(Float, Float)>,
    axis_limit: Float,
}

impl canvas::Program<Message> for OrbitView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::BLACK);

        let center = frame.center();
        let pixels_per_unit = bounds.width.min(bounds.height) / 2. / self.axis_limit as f32;
        let to_screen = |(x, y): (Float, Float)| {
            Point::new(
                center.x + x as f32 * pixels_per_unit,
                center.y - y as f32 * pixels_per_unit,
            )
        };

        if let Some(star) = self.star {
            frame.fill(
                &canvas::Path::circle(to_screen(star), 8.),
                Color::from_rgb(1., 0.85, 0.2),
            );
        }
        for planet in self.planets.iter() {
            frame.fill(
                &canvas::Path::circle(to_screen(*planet), 4.),
                Color::from_rgb(0.3, 0.5, 1.),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gui() -> Gui {
        let (gui, _) = Gui::new(());
        gui
    }

    #[test]
    fn start_runs_one_step_per_frame() {
        let mut gui = gui();
        assert!(!gui.running);

        gui.update(Message::Tick(Instant::now()));
        assert_eq!(gui.frame_index, 0);

        gui.update(Message::Start);
        for _ in 0..3 {
            gui.update(Message::Tick(Instant::now()));
        }

        assert!(gui.running);
        assert_eq!(gui.frame_index, 3);
        assert_eq!(gui.system.steps_taken(), 3);
    }

    #[test]
    fn pause_stops_the_clock() {
        let mut gui = gui();
        gui.update(Message::Start);
        gui.update(Message::TogglePause);

        gui.update(Message::Tick(Instant::now()));

        assert!(!gui.running);
        assert_eq!(gui.frame_index, 0);

        gui.update(Message::TogglePause);
        gui.update(Message::Tick(Instant::now()));
        assert_eq!(gui.frame_index, 1);
    }

    #[test]
    fn bad_time_step_is_reset_on_start() {
        let mut gui = gui();
        gui.update(Message::TimeStepChanged("fast".to_string()));
        gui.update(Message::PlanetToggled(0, false));

        gui.update(Message::Start);

        assert_eq!(gui.time_step_input, "3600");
        assert_eq!(gui.system.time_step(), 3600.);
        assert!(!gui.system.is_active("Mercury"));
    }
}
