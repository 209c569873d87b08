use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use flyby_sim::orbital::{self, DeflectionResult, SweepRange};
use flyby_sim::scenario::{presets, Scenario};
use flyby_sim::sim::{self, Trajectory};

fn main() -> eframe::Result {
    let scenarios: Vec<(Scenario, Trajectory, Option<DeflectionResult>)> = presets::all()
        .into_iter()
        .filter_map(|scenario| {
            match sim::simulate_flyby(&scenario.orbit, &scenario.body, &scenario.sim) {
                Ok(traj) => {
                    let result =
                        DeflectionResult::evaluate(&scenario.orbit, &scenario.body, &traj.states).ok();
                    Some((scenario, traj, result))
                }
                Err(e) => {
                    eprintln!("{}: {}", scenario.name, e);
                    None
                }
            }
        })
        .collect();

    let mu = flyby_sim::types::MU_EARTH;
    let vs_impact = orbital::deflection_vs_impact(&SweepRange::impact_default(), 16.01e3, mu)
        .unwrap_or_default();
    let vs_speed = orbital::deflection_vs_speed(&SweepRange::speed_default(), 8.973e6, mu)
        .unwrap_or_default();

    let app = FlybyViz { scenarios, vs_impact, vs_speed };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Hyperbolic Flyby Around a Planet", options, Box::new(|_| Ok(Box::new(app))))
}

struct FlybyViz {
    scenarios: Vec<(Scenario, Trajectory, Option<DeflectionResult>)>,
    vs_impact: Vec<(f64, f64)>,
    vs_speed: Vec<(f64, f64)>,
}

/// Planet outline in km.
fn planet_disk(radius_m: f64) -> Vec<[f64; 2]> {
    let r = radius_m / 1000.0;
    (0..=128)
        .map(|i| {
            let t = i as f64 / 128.0 * std::f64::consts::TAU;
            [r * t.cos(), r * t.sin()]
        })
        .collect()
}

impl eframe::App for FlybyViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Gravity-assist flyby");
            for (scenario, traj, result) in &self.scenarios {
                let line = match result {
                    Some(r) => format!(
                        "{}: theoretical {:.3} deg  |  numerical {:.3} deg  |  diff {:.3} %  |  {} steps",
                        scenario.name,
                        r.theoretical_deg,
                        r.numerical_deg,
                        r.percent_difference,
                        traj.len() - 1
                    ),
                    None => format!("{}: {} samples", scenario.name, traj.len()),
                };
                ui.label(line);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Trajectory (km)
                ui.vertical(|ui| {
                    ui.label("Trajectory (km)");
                    Plot::new("trajectory")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("x (km)")
                        .y_axis_label("y (km)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            if let Some((scenario, _, _)) = self.scenarios.first() {
                                plot_ui.line(Line::new("Planet surface", planet_disk(scenario.body.radius)));
                            }
                            for (scenario, traj, _) in &self.scenarios {
                                let step = (traj.len() / 4000).max(1);
                                let points: PlotPoints = traj
                                    .positions()
                                    .step_by(step)
                                    .map(|p| [p.x / 1000.0, p.y / 1000.0])
                                    .collect();
                                plot_ui.line(Line::new(scenario.name.clone(), points));
                            }
                            plot_ui.points(Points::new("Planet", vec![[0.0, 0.0]]).radius(3.0));
                        });
                });

                ui.vertical(|ui| {
                    let half_h = available.y / 2.0 - 24.0;

                    ui.label("Deflection vs impact parameter");
                    let points: PlotPoints = self.vs_impact.iter().map(|(b, d)| [b / 1000.0, *d]).collect();
                    Plot::new("vs_impact")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("b (km)")
                        .y_axis_label("delta (deg)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("delta(b)", points));
                        });

                    ui.label("Deflection vs asymptotic velocity");
                    let points: PlotPoints = self.vs_speed.iter().map(|(v, d)| [v / 1000.0, *d]).collect();
                    Plot::new("vs_speed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("v_inf (km/s)")
                        .y_axis_label("delta (deg)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("delta(v_inf)", points));
                        });
                });
            });
        });
    }
}
