use battle_engine::battle::state::Side;
use battle_engine::catalog;
use battle_engine::roster::{PrefabRoster, RosterStore};
use battle_engine::service::BattleService;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logger::init_with_level(log::Level::Info)?;

    catalog::initialize_catalog(Path::new("data"))?;

    let roster = PrefabRoster::new();
    let party = roster
        .get_party("demo")
        .ok_or("prefab roster returned no party")?;
    let player = party
        .into_iter()
        .next()
        .ok_or("prefab party is empty")?
        .into_combatant()?;
    let opponent = catalog::build_combatant("rattata", 5)?;

    let mut service = BattleService::new();
    let battle_id = service.create_battle(player, opponent)?;

    println!("A wild battle begins!");
    let stdin = io::stdin();

    loop {
        let state = service.battle_state(&battle_id)?;
        let player = state.combatant(Side::Player);
        let opponent = state.combatant(Side::Opponent);

        println!();
        println!(
            "{} (Lv.{})  {}/{} HP   vs   {} (Lv.{})  {}/{} HP",
            player.nickname,
            player.level,
            player.current_hp(),
            player.max_hp,
            opponent.nickname,
            opponent.level,
            opponent.current_hp(),
            opponent.max_hp,
        );

        for (i, slot) in player.moves.iter().enumerate() {
            if let Some(instance) = slot {
                println!(
                    "  [{}] {} ({}/{} PP)",
                    i,
                    instance.data.name,
                    instance.pp,
                    instance.max_pp()
                );
            }
        }

        print!("Choose a move: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Ok(move_index) = line.trim().parse::<usize>() else {
            println!("Enter a move number.");
            continue;
        };

        match service.submit_move(&battle_id, move_index) {
            Ok(report) => {
                for action in &report.actions {
                    match &action.move_name {
                        Some(name) => {
                            let actor = service
                                .battle_state(&battle_id)?
                                .combatant(action.actor)
                                .nickname
                                .clone();
                            if action.hit {
                                println!(
                                    "{} used {}! Dealt {} damage{}",
                                    actor,
                                    name,
                                    action.damage,
                                    if action.critical_hit {
                                        " (critical hit!)"
                                    } else {
                                        ""
                                    }
                                );
                            } else {
                                println!("{} used {} but missed!", actor, name);
                            }
                        }
                        None => println!("{} passed!", action.actor),
                    }
                }
                if let Some(outcome) = report.outcome {
                    println!();
                    println!("{}!", outcome);
                    break;
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}
