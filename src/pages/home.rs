use rand::Rng;

use crate::data_backend::EMOJIS;
use crate::data_types::Page;

pub fn home_to_msg() -> String {
    let mut msg = String::new();

    let rand_emoji = EMOJIS[rand::thread_rng().gen_range(0..EMOJIS.len())];
    msg += &format!("{} Kitchen Analytics Dashboard {}\n", rand_emoji, rand_emoji);
    msg += "Welcome to your kitchen management system\n";

    let quick_actions = [
        (
            "Demand Analysis",
            "Analyze ingredient consumption patterns",
            Page::Demand,
        ),
        (
            "Menu Optimization",
            "Optimize your menu with AI recommendations",
            Page::Menu,
        ),
        (
            "AI Dishes",
            "Generate dishes from inventory or your own ingredients",
            Page::AiDishes,
        ),
    ];

    for (title, description, page) in quick_actions {
        msg += &format!("\n{}\n", title);
        msg += &format!("   {}\n", description);
        msg += &format!("   → {}\n", page.route());
    }

    msg
}
