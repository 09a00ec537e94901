//! PID Controller - 比例-积分-微分控制器
//!
//! 标量和三轴版本共用同一个实现 [`Pid<S>`]，由 [`PidSignal`] 抽象信号类型。
//!
//! # 算法
//!
//! ```text
//! output = bound(P * e + I * ∫e dt + D * de/dt, max)
//! ```
//!
//! # 模式选择
//!
//! 在 `init` 时根据增益选定一次，之后每次 `update` 不再判断：
//!
//! | 条件 | 模式 |
//! |---|---|
//! | P > 0, I > 0, D > 0 | PID |
//! | P > 0, I > 0 | PI |
//! | P > 0, D > 0 | PD |
//! | P > 0 | P |
//! | 其他 | PID（兜底） |
//!
//! 每个模式只计算名称中包含的项：PI 和 P 模式不更新上一次误差，
//! PD 和 P 模式不累积积分。
//!
//! 除输出钳位外没有积分饱和保护，积分项无条件累积。
//!
//! # 示例
//!
//! ```rust
//! use physmc_control::{ScalarPid, VectorPid};
//! use physmc_types::{PidGains, Vec3};
//!
//! let mut pid = ScalarPid::new(PidGains::proportional(10.0, 50.0));
//! assert_eq!(pid.update(0.5, 0.01), 5.0);
//!
//! let mut pid = VectorPid::new(PidGains::proportional(1.0, 100.0));
//! let out = pid.update(Vec3::new(10.0, 0.0, 0.0), 0.01);
//! assert_eq!(out, Vec3::new(10.0, 0.0, 0.0));
//! ```

use physmc_types::{OutputBound, PidGains, Vec3};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// PID 可处理的信号类型
pub trait PidSignal:
    Copy + fmt::Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// 零信号
    fn zero() -> Self;

    /// 将输出限制在 `max` 之内
    fn bound(self, max: f64, bound: OutputBound) -> Self;
}

fn clamp_abs(value: f64, max: f64) -> f64 {
    // 不用 f64::clamp：max 为负或 NaN 时它会 panic
    if value > max {
        max
    } else if value < -max {
        -max
    } else {
        value
    }
}

impl PidSignal for f64 {
    fn zero() -> Self {
        0.0
    }

    fn bound(self, max: f64, _bound: OutputBound) -> Self {
        clamp_abs(self, max)
    }
}

impl PidSignal for Vec3 {
    fn zero() -> Self {
        Vec3::zeros()
    }

    fn bound(self, max: f64, bound: OutputBound) -> Self {
        match bound {
            OutputBound::Cube => self.map(|c| clamp_abs(c, max)),
            OutputBound::Sphere => {
                let norm = self.norm();
                if norm > max {
                    if max > 0.0 {
                        self * (max / norm)
                    } else {
                        Vec3::zeros()
                    }
                } else {
                    self
                }
            },
        }
    }
}

/// 更新律
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidMode {
    Pid,
    Pi,
    Pd,
    P,
}

impl PidMode {
    /// 根据增益选择更新律
    pub fn select(gains: &PidGains) -> Self {
        let (p, i, d) = (gains.p > 0.0, gains.i > 0.0, gains.d > 0.0);
        if p && i && d {
            PidMode::Pid
        } else if p && i {
            PidMode::Pi
        } else if p && d {
            PidMode::Pd
        } else if p {
            PidMode::P
        } else {
            PidMode::Pid
        }
    }
}

impl fmt::Display for PidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PidMode::Pid => "PID",
            PidMode::Pi => "PI",
            PidMode::Pd => "PD",
            PidMode::P => "P",
        };
        f.write_str(name)
    }
}

/// PID 控制器
#[derive(Debug, Clone, PartialEq)]
pub struct Pid<S> {
    gains: PidGains,
    mode: PidMode,
    bound: OutputBound,
    /// 积分误差
    integral: S,
    /// 上一次的误差（用于计算微分）
    previous_error: S,
}

/// 单轴 PID
pub type ScalarPid = Pid<f64>;

/// 三轴 PID（三个通道共享一组增益，合成后统一限幅）
pub type VectorPid = Pid<Vec3>;

impl<S: PidSignal> Pid<S> {
    /// 创建控制器并清零误差
    pub fn new(gains: PidGains) -> Self {
        Pid {
            gains,
            mode: PidMode::select(&gains),
            bound: OutputBound::default(),
            integral: S::zero(),
            previous_error: S::zero(),
        }
    }

    /// 设置限幅方式（仅对三轴有意义）
    pub fn with_output_bound(mut self, bound: OutputBound) -> Self {
        self.bound = bound;
        self
    }

    /// 重新设置增益并重新选择更新律
    ///
    /// `clear_errors = false` 时保留积分和微分记忆，用于运动中调整增益而不产生跳变。
    pub fn init(&mut self, gains: PidGains, clear_errors: bool) {
        self.gains = gains;
        if clear_errors {
            self.reset();
        }
        self.mode = PidMode::select(&gains);
    }

    /// 清零积分和微分记忆
    pub fn reset(&mut self) {
        self.integral = S::zero();
        self.previous_error = S::zero();
    }

    /// 计算一步输出
    ///
    /// 调用方必须保证 `dt > 0`。
    pub fn update(&mut self, error: S, dt: f64) -> S {
        debug_assert!(dt > 0.0, "PID update requires dt > 0, got {dt}");

        let PidGains { p, i, d, max_output } = self.gains;
        let output = match self.mode {
            PidMode::Pid => {
                self.integral = self.integral + error * dt;
                let derivative = (error - self.previous_error) * (1.0 / dt);
                self.previous_error = error;
                error * p + self.integral * i + derivative * d
            },
            PidMode::Pi => {
                self.integral = self.integral + error * dt;
                error * p + self.integral * i
            },
            PidMode::Pd => {
                let derivative = (error - self.previous_error) * (1.0 / dt);
                self.previous_error = error;
                error * p + derivative * d
            },
            PidMode::P => error * p,
        };

        output.bound(max_output, self.bound)
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn mode(&self) -> PidMode {
        self.mode
    }

    pub fn output_bound(&self) -> OutputBound {
        self.bound
    }

    pub fn set_output_bound(&mut self, bound: OutputBound) {
        self.bound = bound;
    }

    /// 当前积分误差（用于调试和监控）
    pub fn integral(&self) -> S {
        self.integral
    }

    /// 上一次误差
    pub fn previous_error(&self) -> S {
        self.previous_error
    }
}

impl<S: PidSignal> Default for Pid<S> {
    fn default() -> Self {
        Pid::new(PidGains::default())
    }
}
