//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::capacity::CapacityRule;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 将密码混淆后的文本隐藏到无损图像 (如 PNG, BMP) 蓝色通道最低位中，或从中恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将密码混淆后的文本隐藏到无损图像 (如 PNG, BMP) 蓝色通道的最低有效位中，或从中恢复。"
)]
pub struct Cli {
    /// 输出更多日志 (-v: info, -vv: debug, -vvv: trace)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 menu (交互式菜单)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一条消息。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的消息。
    #[command(alias = "show")]
    Recover(RecoverArgs),

    /// 进入交互式菜单 (hide, show, exit)。
    Menu(MenuArgs),
}

/// 要隐藏的消息来源：直接给出文本，或读取一个文件。
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MessageSource {
    /// 要隐藏的消息文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文本文件路径 (按原始字节读取)。
    #[arg(short, long)]
    pub text: Option<PathBuf>,
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub source: MessageSource,

    /// 结果图像的输出路径。默认为输入图像同目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 用于混淆消息的密码。
    #[arg(short, long, env = "LSB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// 可用容量的计算规则。
    #[arg(long, value_enum, default_value_t = CapacityRule::WidthSquared)]
    pub capacity_rule: CapacityRule,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 用于还原消息的密码。
    #[arg(short, long, env = "LSB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// 将恢复的原始字节另存到该文件。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 找不到终止标记时报错，而不是将整幅图像的比特都当作消息。
    #[arg(long)]
    pub strict: bool,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'menu' 命令所需的参数。
#[derive(Args, Debug, Default)]
pub struct MenuArgs {
    /// 可用容量的计算规则。
    #[arg(long, value_enum, default_value_t = CapacityRule::WidthSquared)]
    pub capacity_rule: CapacityRule,
}
