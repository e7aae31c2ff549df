//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `menu` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O 与图像编解码、调用隐写核心以及向用户报告结果。

use crate::capacity::CapacityRule;
use crate::cli::{HideArgs, MenuArgs, MessageSource, RecoverArgs};
use crate::codec::{TerminatorPolicy, bytes_to_chars};
use crate::constants::DOCTORED_PREFIX;
use crate::error::StegError;
use crate::steganography::{hide, reveal};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use log::{info, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像与消息、检查容量、将混淆后的消息写入蓝色通道，
/// 最后以无损格式保存结果图像。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 输出路径的扩展名对应有损或不受支持的格式。
/// * 密码为空，或图像没有足够的空间来隐藏消息。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| default_dest(&args.image));
    ensure_writable(&dest, args.force)?;
    let format = output_format(&dest)?;

    let mut picture = load_picture(&args.image)?;
    let message = read_message(&args.source)?;

    info!(
        "hiding {} bytes in {}x{} image",
        message.len(),
        picture.width(),
        picture.height()
    );

    hide(
        &mut picture,
        &message,
        args.password.as_bytes(),
        args.capacity_rule,
    )
    .with_context(|| {
        format!(
            "Failed to hide the message in '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    picture.save_with_format(&dest, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的图像、提取全部比特并用密码还原消息，打印到标准输出；
/// 若指定了 `--text`，同时将原始字节写入该文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 密码为空，或在 `--strict` 模式下找不到终止标记。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let picture = load_picture(&args.image)?;
    let policy = if args.strict {
        TerminatorPolicy::Strict
    } else {
        TerminatorPolicy::Lenient
    };

    let message = reveal(&picture, args.password.as_bytes(), policy).with_context(|| {
        format!(
            "Failed to recover the message from '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!("Message: {}", render_message(&message));

    if let Some(text) = &args.text {
        fs::write(text, &message).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?;

        println!(
            "The message has been successfully recovered and saved: {}",
            text.to_string_lossy().green().bold()
        );
    }

    Ok(())
}

/// 处理 'Menu' 命令：在标准输入/输出上运行交互式菜单。
pub fn handle_menu(args: MenuArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(stdin.lock(), stdout.lock(), args.capacity_rule)
}

/// 交互式菜单主循环。
///
/// 反复询问任务 (`hide`, `show`, `exit`)，单个任务失败时报告原因后继续循环。
/// 输入结束 (EOF) 时退出。
pub fn run_menu<R: BufRead, W: Write>(mut input: R, mut output: W, rule: CapacityRule) -> Result<()> {
    loop {
        let Some(task) = prompt(&mut input, &mut output, "Task (hide, show, exit):")? else {
            return Ok(());
        };

        match task.as_str() {
            "exit" => {
                writeln!(output, "Bye!")?;
                return Ok(());
            }
            "hide" => menu_hide(&mut input, &mut output, rule)?,
            "show" => menu_show(&mut input, &mut output)?,
            other => writeln!(output, "Wrong task: {other}")?,
        }
    }
}

fn menu_hide<R: BufRead, W: Write>(input: &mut R, output: &mut W, rule: CapacityRule) -> Result<()> {
    let Some(image_path) = prompt(input, output, "Input image file:")? else {
        return Ok(());
    };
    let Some(dest) = prompt(input, output, "Output image file:")? else {
        return Ok(());
    };
    let Some(message) = prompt(input, output, "Message to hide:")? else {
        return Ok(());
    };
    let Some(password) = prompt(input, output, "Password:")? else {
        return Ok(());
    };

    let Ok(mut picture) = load_picture(Path::new(&image_path)) else {
        writeln!(output, "Can't read input file!")?;
        return Ok(());
    };

    match hide(&mut picture, message.as_bytes(), password.as_bytes(), rule) {
        Ok(()) => {}
        Err(StegError::CapacityExceeded { .. } | StegError::GridTooSmall { .. }) => {
            writeln!(
                output,
                "The input image is not large enough to hold this message."
            )?;
            return Ok(());
        }
        Err(err) => {
            writeln!(output, "{err}")?;
            return Ok(());
        }
    }

    writeln!(output, "Input Image: {image_path}")?;
    writeln!(output, "Output Image: {dest}")?;

    let dest = PathBuf::from(dest);
    let saved = output_format(&dest)
        .and_then(|format| picture.save_with_format(&dest, format).map_err(Into::into));
    match saved {
        Ok(()) => writeln!(output, "Message saved in {} image.", dest.display())?,
        Err(err) => {
            warn!("saving {} failed: {err:#}", dest.display());
            writeln!(output, "Image {} is not saved.", dest.display())?;
        }
    }

    Ok(())
}

fn menu_show<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let Some(image_path) = prompt(input, output, "Input image file:")? else {
        return Ok(());
    };
    let Some(password) = prompt(input, output, "Password:")? else {
        return Ok(());
    };

    let Ok(picture) = load_picture(Path::new(&image_path)) else {
        writeln!(output, "Can't read input file!")?;
        return Ok(());
    };

    match reveal(&picture, password.as_bytes(), TerminatorPolicy::Lenient) {
        Ok(message) => writeln!(output, "Message: {}", render_message(&message))?,
        Err(err) => writeln!(output, "{err}")?,
    }

    Ok(())
}

/// 打印提示并读取一行输入 (去掉行尾换行符)，输入结束时返回 `None`。
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    writeln!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// 读取图像并转换为 RGBA，保留原有的 alpha 通道。
fn load_picture(path: &Path) -> Result<RgbaImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(picture.to_rgba8())
}

fn read_message(source: &MessageSource) -> Result<Vec<u8>> {
    match (&source.message, &source.text) {
        (Some(message), _) => Ok(message.clone().into_bytes()),
        (None, Some(path)) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        (None, None) => anyhow::bail!("Either --message or --text must be provided."),
    }
}

/// 输入图像同目录下的 `doctored_<文件名>.png`。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{DOCTORED_PREFIX}{stem}.png"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 根据扩展名选择输出格式，只允许无损格式；无法识别的扩展名按 PNG 保存。
fn output_format(dest: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(dest) {
        Ok(
            format @ (ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
            | ImageFormat::Qoi),
        ) => Ok(format),
        Ok(format) => anyhow::bail!(
            "Cannot save to {} ({:?}): the format is lossy or unsupported and would destroy the hidden bits. \nUse PNG, BMP, TIFF, WebP or QOI.",
            dest.to_string_lossy().red().bold(),
            format
        ),
        Err(_) => Ok(ImageFormat::Png),
    }
}

/// 合法的 UTF-8 按原文显示，否则退回到一个字节对应一个字符。
fn render_message(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            warn!("recovered bytes are not valid UTF-8 ({err}), showing them byte by byte");
            bytes_to_chars(bytes)
        }
    }
}
